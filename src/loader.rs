//! CSV loader / CLI boundary (§4.L): the only place malformed input is
//! rejected. The engine itself assumes every [`crate::types::Transaction`]
//! it receives is already valid.

use crate::error::EngineError;
use crate::types::Transaction;
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::Path;

/// One row of the boundary CSV schema (§6 input schema): plain strings and a
/// naive timestamp, before any validation has run.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: String,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Validates and converts a single boundary record into a [`Transaction`].
///
/// Rejects non-positive amounts and timestamps that do not match
/// `YYYY-MM-DD HH:MM:SS`; the parsed timestamp is interpreted as UTC (§9:
/// any local-timezone interpretation would desynchronize window boundaries).
pub fn validate_record(row: usize, record: TransactionRecord) -> Result<Transaction, EngineError> {
    if record.amount <= 0.0 {
        return Err(EngineError::InvalidRow {
            row,
            reason: format!("amount must be positive, got {}", record.amount),
        });
    }

    let naive = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).map_err(|e| {
        EngineError::InvalidRow {
            row,
            reason: format!("unparseable timestamp '{}': {e}", record.timestamp),
        }
    })?;

    Ok(Transaction {
        transaction_id: record.transaction_id,
        sender_id: record.sender_id,
        receiver_id: record.receiver_id,
        amount: record.amount,
        timestamp: Utc.from_utc_datetime(&naive),
    })
}

/// Reads and validates every row of a CSV file at `path`, in file order.
///
/// Extra columns are permitted and ignored (§6); the first invalid row
/// aborts the load with its 1-indexed row number.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>, EngineError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut transactions = Vec::new();

    for (idx, result) in reader.deserialize::<TransactionRecord>().enumerate() {
        let record = result?;
        transactions.push(validate_record(idx + 1, record)?);
    }

    tracing::info!(count = transactions.len(), "loaded transactions");
    Ok(transactions)
}
