//! Shell-Chain Detector (§4.H): flags accounts on directed paths of length
//! >= 3 whose intermediate nodes are thin, disposable "shell" accounts.

use crate::graph::TransactionGraph;
use std::collections::HashSet;

/// Returns true iff `total_transactions` falls in the shell-intermediate
/// range `[min_intermediate_tx, max_intermediate_tx]` (§4.H definition).
fn is_shell_intermediate(
    graph: &TransactionGraph,
    id: &str,
    min_intermediate_tx: usize,
    max_intermediate_tx: usize,
) -> bool {
    graph
        .node(id)
        .map(|n| {
            n.total_transactions >= min_intermediate_tx && n.total_transactions <= max_intermediate_tx
        })
        .unwrap_or(false)
}

/// Runs the shell-chain detector from every node in the graph.
///
/// Only continues descending through a node if it is itself shell-like; the
/// seed and the final node of any discovered path are exempt from that
/// requirement and are flagged regardless of their own activity (§4.H).
#[tracing::instrument(skip_all)]
pub fn detect_shell_chains(
    graph: &TransactionGraph,
    min_hops: usize,
    max_depth: usize,
    min_intermediate_tx: usize,
    max_intermediate_tx: usize,
) -> HashSet<String> {
    let mut flagged = HashSet::new();

    for seed in graph.node_ids() {
        let mut path = vec![seed.clone()];
        let mut on_path: HashSet<String> = HashSet::new();
        on_path.insert(seed.clone());

        walk(
            graph,
            &mut path,
            &mut on_path,
            max_depth,
            min_hops,
            min_intermediate_tx,
            max_intermediate_tx,
            &mut flagged,
        );
    }

    flagged
}

#[allow(clippy::too_many_arguments)]
fn walk(
    graph: &TransactionGraph,
    path: &mut Vec<String>,
    on_path: &mut HashSet<String>,
    remaining_depth: usize,
    min_hops: usize,
    min_intermediate_tx: usize,
    max_intermediate_tx: usize,
    flagged: &mut HashSet<String>,
) {
    if remaining_depth == 0 {
        return;
    }

    let current = path.last().unwrap().clone();
    let mut neighbors: Vec<&String> = graph.forward_neighbors(&current).collect();
    neighbors.sort();

    for next in neighbors {
        if on_path.contains(next) {
            continue;
        }

        path.push(next.clone());
        let hops = path.len() - 1;
        if hops >= min_hops {
            for node in path.iter() {
                flagged.insert(node.clone());
            }
        }

        if is_shell_intermediate(graph, next, min_intermediate_tx, max_intermediate_tx) {
            on_path.insert(next.clone());
            walk(
                graph,
                path,
                on_path,
                remaining_depth - 1,
                min_hops,
                min_intermediate_tx,
                max_intermediate_tx,
                flagged,
            );
            on_path.remove(next);
        }

        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::types::Transaction;
    use chrono::{TimeZone, Utc};

    fn tx(id: &str, from: &str, to: &str, hour: i64) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount: 100.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::hours(hour),
        }
    }

    #[test]
    fn flags_full_chain_through_shell_intermediates() {
        // A -> B -> C -> D -> E, B/C/D each exactly 2 transactions.
        // A and E have extra activity so they are not shell-like themselves.
        let txs = vec![
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 1),
            tx("T3", "C", "D", 2),
            tx("T4", "D", "E", 3),
            tx("T5", "A", "Z1", 4),
            tx("T6", "A", "Z2", 5),
            tx("T7", "Z3", "E", 6),
            tx("T8", "Z4", "E", 7),
        ];
        let graph = build_graph(&txs);
        let flagged = detect_shell_chains(&graph, 3, 6, 2, 3);

        for id in ["A", "B", "C", "D", "E"] {
            assert!(flagged.contains(id), "{id} should be flagged");
        }
    }

    #[test]
    fn short_chain_below_min_hops_not_flagged() {
        // A -> B -> C, only 2 hops.
        let txs = vec![tx("T1", "A", "B", 0), tx("T2", "B", "C", 1)];
        let graph = build_graph(&txs);
        let flagged = detect_shell_chains(&graph, 3, 6, 2, 3);
        assert!(flagged.is_empty());
    }

    #[test]
    fn non_shell_intermediate_breaks_the_chain() {
        // B has 5 transactions, outside the shell range [2,3], so chains
        // through B should not extend past it.
        let txs = vec![
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 1),
            tx("T3", "C", "D", 2),
            // Pad B's activity well above the shell range.
            tx("T4", "X1", "B", 3),
            tx("T5", "X2", "B", 4),
            tx("T6", "X3", "B", 5),
            tx("T7", "X4", "B", 6),
        ];
        let graph = build_graph(&txs);
        let flagged = detect_shell_chains(&graph, 3, 6, 2, 3);
        assert!(flagged.is_empty());
    }
}
