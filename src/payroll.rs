//! False-Positive Filter (§4.F): suppresses fan-out flags on senders whose
//! outbound amounts look like regular payroll or subscription disbursement
//! rather than smurfing.

use crate::config::EngineConfig;
use crate::graph::TransactionGraph;
use crate::types::PatternTag;

/// Population coefficient of variation: standard deviation / mean.
///
/// Returns `None` when there are fewer than two amounts or the mean is zero,
/// in which case the payroll predicate cannot hold.
fn coefficient_of_variation(amounts: &[f64]) -> Option<f64> {
    if amounts.len() < 2 {
        return None;
    }
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    if mean == 0.0 {
        return None;
    }
    let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / amounts.len() as f64;
    Some(variance.sqrt() / mean)
}

/// A sender qualifies as payroll-like iff it issued at least
/// `payroll_min_count` outbound transactions whose amounts have a
/// coefficient of variation strictly below `payroll_cv_cap` (§4.F, §8: a CV
/// exactly equal to the cap is NOT exempted).
fn is_payroll_like(graph: &TransactionGraph, id: &str, config: &EngineConfig) -> bool {
    let amounts: Vec<f64> = graph
        .outgoing_edges(id)
        .iter()
        .map(|e| e.amount)
        .collect();

    if amounts.len() < config.payroll_min_count {
        return false;
    }

    match coefficient_of_variation(&amounts) {
        Some(cv) => cv < config.payroll_cv_cap,
        None => false,
    }
}

/// Applies the payroll exemption to every account in the graph.
///
/// A payroll sender that is flagged but carries no cycle tag has its
/// `fan_out` tag removed and 25 points subtracted (clamped at 0); cycle
/// participation always overrides the exemption (§4.F rationale).
#[tracing::instrument(skip_all)]
pub fn apply_payroll_filter(graph: &mut TransactionGraph, config: &EngineConfig) {
    let candidate_ids: Vec<String> = graph
        .node_ids()
        .iter()
        .filter(|id| {
            graph
                .node(id)
                .map(|n| n.is_suspicious && n.detected_patterns.contains(&PatternTag::FanOut))
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    for id in candidate_ids {
        if !is_payroll_like(graph, &id, config) {
            continue;
        }

        let node = graph.node_mut(&id).unwrap();
        let has_cycle_tag = node
            .detected_patterns
            .iter()
            .any(|t| matches!(t, PatternTag::CycleLength3 | PatternTag::CycleLength4 | PatternTag::CycleLength5));
        if has_cycle_tag {
            continue;
        }

        node.detected_patterns.retain(|t| *t != PatternTag::FanOut);
        node.suspicion_score = (node.suspicion_score - config.score_fan_out).max(0.0);

        if node.detected_patterns.is_empty() {
            node.is_suspicious = false;
            node.suspicion_score = 0.0;
        }
    }
}
