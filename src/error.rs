//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors the analysis engine itself can surface.
///
/// Given well-formed transactions every component succeeds (§7); the
/// variants here exist for programmer-error / invariant-breach paths, not
/// for rejecting bad input (that is the CSV boundary's job, see
/// [`crate::loader`]).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AnalysisError {
    #[error("duplicate transaction id in batch: {0}")]
    DuplicateTransactionId(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Not a failure: callers passed an empty batch. The engine short-circuits
    /// to a degenerate, empty [`crate::report::Report`] instead of returning
    /// this error (§7); it exists so components upstream of the engine can
    /// distinguish the case explicitly if they need to.
    #[error("transaction batch is empty")]
    EmptyBatch,
}

/// Errors surfaced at the CLI/loader boundary, wrapping both the engine and
/// the CSV/IO layer underneath it.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("failed to read input CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}
