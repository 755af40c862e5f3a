//! Smurfing Detector (§4.S): flags accounts participating in burst fan-in or
//! fan-out, i.e. many distinct counterparties inside a short sliding window.

use crate::graph::TransactionGraph;
use crate::types::Edge;
use chrono::Duration;
use std::collections::{HashSet, VecDeque};

/// Result of the smurfing pass: disjoint sets of flagged accounts per direction.
#[derive(Debug, Default)]
pub struct SmurfingResult {
    pub fan_in: HashSet<String>,
    pub fan_out: HashSet<String>,
}

/// Two-pointer sliding-window scan over a time-ordered edge list, testing
/// whether any window of width <= `window_hours` contains at least
/// `threshold` distinct counterparties.
///
/// Window semantics are inclusive on both ends: width is measured as
/// `timestamp[right] - timestamp[left] <= window_hours` (§4.S). Flags on the
/// first satisfying window, then stops (detection is a yes/no per account).
fn has_burst_window(edges: &[&Edge], counterparty: impl Fn(&Edge) -> &str, threshold: usize, window_hours: i64) -> bool {
    let window = Duration::hours(window_hours);
    let mut left = 0usize;
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    let mut order: VecDeque<&str> = VecDeque::new();

    for right in 0..edges.len() {
        let cp = counterparty(edges[right]);
        *counts.entry(cp).or_insert(0) += 1;
        order.push_back(cp);

        while edges[right].timestamp - edges[left].timestamp > window {
            let leaving = counterparty(edges[left]);
            if let Some(c) = counts.get_mut(leaving) {
                *c -= 1;
                if *c == 0 {
                    counts.remove(leaving);
                }
            }
            left += 1;
        }

        if counts.len() >= threshold {
            return true;
        }
    }

    false
}

/// Runs the smurfing detector over every account in the graph.
#[tracing::instrument(skip_all)]
pub fn detect_smurfing(
    graph: &TransactionGraph,
    threshold: usize,
    window_hours: i64,
) -> SmurfingResult {
    let mut result = SmurfingResult::default();

    for id in graph.node_ids() {
        let incoming = graph.incoming_edges(id);
        if has_burst_window(&incoming, |e| e.source.as_str(), threshold, window_hours) {
            result.fan_in.insert(id.clone());
        }

        let outgoing = graph.outgoing_edges(id);
        if has_burst_window(&outgoing, |e| e.target.as_str(), threshold, window_hours) {
            result.fan_out.insert(id.clone());
        }
    }

    result
}
