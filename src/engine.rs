//! The top-level pipeline (§2): wires the graph builder, the four
//! detectors, the scorer, the payroll filter, and the ring assembler
//! together into a single `analyze` entry point.

use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::graph::{build_graph, TransactionGraph};
use crate::payroll::apply_payroll_filter;
use crate::report::{build_report, Report};
use crate::rings::assemble_rings;
use crate::scorer::{apply_scores, run_detectors};
use crate::types::Transaction;
use std::collections::HashSet;
use std::time::Instant;

/// Owns the tuning configuration and exposes the single `analyze` operation
/// that runs the full pipeline over one batch of transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Runs the full detection pipeline: G -> {C, S, H, V} -> R -> F -> A -> E.
    ///
    /// An empty batch is not an error (§7): it produces a degenerate report
    /// with zero accounts, zero rings, and a near-zero processing time.
    /// A batch with a repeated `transaction_id` is rejected outright, since
    /// every downstream index assumes transaction ids are unique within a
    /// batch.
    #[tracing::instrument(skip_all, fields(batch_size = transactions.len()))]
    pub fn analyze(&self, transactions: &[Transaction]) -> Result<Report, AnalysisError> {
        let start = Instant::now();

        if transactions.is_empty() {
            tracing::info!("empty batch, returning degenerate report");
            let graph = build_graph(transactions);
            let report = build_report(&graph, Vec::new(), start.elapsed().as_secs_f64());
            return Ok(report);
        }

        check_unique_transaction_ids(transactions)?;

        let mut graph = build_graph(transactions);
        tracing::info!(accounts = graph.account_count(), "graph built");

        let outputs = run_detectors(&graph, &self.config);
        apply_scores(&mut graph, &outputs, &self.config);
        apply_payroll_filter(&mut graph, &self.config);
        let rings = assemble_rings(&mut graph, &outputs.cycles)?;

        let elapsed = start.elapsed().as_secs_f64();
        tracing::info!(
            suspicious = graph.nodes().iter().filter(|n| n.is_suspicious).count(),
            rings = rings.len(),
            elapsed_seconds = elapsed,
            "analysis complete"
        );

        Ok(build_report(&graph, rings, elapsed))
    }
}

fn check_unique_transaction_ids(transactions: &[Transaction]) -> Result<(), AnalysisError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(transactions.len());
    for tx in transactions {
        if !seen.insert(tx.transaction_id.as_str()) {
            return Err(AnalysisError::DuplicateTransactionId(tx.transaction_id.clone()));
        }
    }
    Ok(())
}

/// Exposed for callers (e.g. the CLI) that want to build the graph without
/// running the full pipeline, such as pre-flight validation.
pub fn graph_for(transactions: &[Transaction]) -> TransactionGraph {
    build_graph(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tx(id: &str, from: &str, to: &str, hour: i64) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount: 1500.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::hours(hour),
        }
    }

    #[test]
    fn empty_batch_yields_degenerate_report() {
        let engine = Engine::new();
        let report = engine.analyze(&[]).unwrap();
        assert_eq!(report.summary.total_accounts_analyzed, 0);
        assert_eq!(report.summary.suspicious_accounts_flagged, 0);
        assert_eq!(report.summary.fraud_rings_detected, 0);
        assert!(report.suspicious_accounts.is_empty());
        assert!(report.fraud_rings.is_empty());
    }

    #[test]
    fn duplicate_transaction_id_rejected() {
        let txs = vec![tx("T1", "A", "B", 0), tx("T1", "B", "C", 1)];
        let engine = Engine::new();
        let err = engine.analyze(&txs).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateTransactionId(ref id) if id == "T1"));
    }

    #[test]
    fn triangle_cycle_end_to_end() {
        let txs = vec![tx("T1", "A", "B", 0), tx("T2", "B", "C", 1), tx("T3", "C", "A", 2)];
        let engine = Engine::new();
        let report = engine.analyze(&txs).unwrap();

        assert_eq!(report.summary.total_accounts_analyzed, 3);
        assert_eq!(report.summary.suspicious_accounts_flagged, 3);
        assert_eq!(report.fraud_rings.len(), 1);
        assert_eq!(report.fraud_rings[0].ring_id, "RING_001");
        for account in &report.suspicious_accounts {
            assert_eq!(account.suspicion_score, 40.0);
            assert_eq!(account.ring_id.as_deref(), Some("RING_001"));
        }
    }
}
