//! Velocity Detector (§4.V): flags senders issuing a burst of outbound
//! transactions in a short window, independent of counterparty diversity.

use crate::graph::TransactionGraph;
use chrono::Duration;
use std::collections::HashSet;

/// Two-pointer scan over a sender's time-ordered outbound edges, testing
/// whether any window of width <= `window_hours` contains at least
/// `threshold` transactions (not necessarily distinct counterparties).
fn has_velocity_burst(timestamps: &[chrono::DateTime<chrono::Utc>], threshold: usize, window_hours: i64) -> bool {
    let window = Duration::hours(window_hours);
    let mut left = 0usize;

    for right in 0..timestamps.len() {
        while timestamps[right] - timestamps[left] > window {
            left += 1;
        }
        if right - left + 1 >= threshold {
            return true;
        }
    }

    false
}

/// Runs the velocity detector over every account that has sent at least one
/// transaction.
#[tracing::instrument(skip_all)]
pub fn detect_high_velocity(
    graph: &TransactionGraph,
    threshold: usize,
    window_hours: i64,
) -> HashSet<String> {
    let mut flagged = HashSet::new();

    for id in graph.node_ids() {
        let outgoing = graph.outgoing_edges(id);
        if outgoing.len() < threshold {
            continue;
        }
        let timestamps: Vec<_> = outgoing.iter().map(|e| e.timestamp).collect();
        if has_velocity_burst(&timestamps, threshold, window_hours) {
            flagged.insert(id.clone());
        }
    }

    flagged
}
