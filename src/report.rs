//! Report Emitter (§4.E): projects the final node table and assembled rings
//! into the external report structure (§6 output schema).

use crate::graph::TransactionGraph;
use crate::types::FraudRing;
use serde::{Deserialize, Serialize};

/// A single flagged account, as surfaced to a reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_id: Option<String>,
}

/// Aggregate run statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub processing_time_seconds: f64,
}

/// The full structured report handed back to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<FraudRing>,
    pub summary: Summary,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Projects `graph` and `rings` into a [`Report`].
///
/// `suspicious_accounts` is sorted by descending suspicion score; ties are
/// broken by insertion order (graph node order), which `node_ids()` already
/// preserves, so a stable sort over that order is sufficient.
#[tracing::instrument(skip_all)]
pub fn build_report(
    graph: &TransactionGraph,
    rings: Vec<FraudRing>,
    processing_time_seconds: f64,
) -> Report {
    let mut suspicious_accounts: Vec<SuspiciousAccount> = graph
        .node_ids()
        .iter()
        .filter_map(|id| graph.node(id))
        .filter(|n| n.is_suspicious)
        .map(|n| SuspiciousAccount {
            account_id: n.id.clone(),
            suspicion_score: round1(n.suspicion_score),
            detected_patterns: n.detected_patterns.iter().map(|t| t.to_string()).collect(),
            ring_id: n.ring_id.clone(),
        })
        .collect();

    suspicious_accounts.sort_by(|a, b| {
        b.suspicion_score
            .partial_cmp(&a.suspicion_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let summary = Summary {
        total_accounts_analyzed: graph.account_count(),
        suspicious_accounts_flagged: suspicious_accounts.len(),
        fraud_rings_detected: rings.len(),
        processing_time_seconds: round2(processing_time_seconds),
    };

    Report {
        suspicious_accounts,
        fraud_rings: rings,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::graph::build_graph;
    use crate::payroll::apply_payroll_filter;
    use crate::rings::assemble_rings;
    use crate::scorer::{apply_scores, run_detectors};
    use crate::types::Transaction;
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
    fn sorted_descending_by_score() {
        let txs = vec![tx("T1", "A", "B", 0), tx("T2", "B", "C", 1), tx("T3", "C", "A", 2)];
        let mut graph = build_graph(&txs);
        let config = EngineConfig::default();
        let outputs = run_detectors(&graph, &config);
        apply_scores(&mut graph, &outputs, &config);
        apply_payroll_filter(&mut graph, &config);
        let rings = assemble_rings(&mut graph, &outputs.cycles).unwrap();
        let report = build_report(&graph, rings, 0.01);

        assert_eq!(report.summary.total_accounts_analyzed, 3);
        assert_eq!(report.summary.suspicious_accounts_flagged, 3);
        assert_eq!(report.summary.fraud_rings_detected, 1);
        for pair in report.suspicious_accounts.windows(2) {
            assert!(pair[0].suspicion_score >= pair[1].suspicion_score);
        }
    }

    #[test]
    fn ring_id_matches_regex_shape() {
        let txs = vec![tx("T1", "A", "B", 0), tx("T2", "B", "C", 1), tx("T3", "C", "A", 2)];
        let mut graph = build_graph(&txs);
        let config = EngineConfig::default();
        let outputs = run_detectors(&graph, &config);
        apply_scores(&mut graph, &outputs, &config);
        apply_payroll_filter(&mut graph, &config);
        let rings = assemble_rings(&mut graph, &outputs.cycles).unwrap();
        let report = build_report(&graph, rings, 0.01);

        for ring in &report.fraud_rings {
            assert_eq!(ring.ring_id.len(), 8);
            assert!(ring.ring_id.starts_with("RING_"));
            assert!(ring.ring_id[5..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
