//! Cycle Detector (§4.C): enumerates simple directed cycles of length 3-5.

use crate::graph::TransactionGraph;
use std::collections::{HashMap, HashSet};

/// A detected directed cycle: a closed, ordered walk starting and ending
/// (implicitly) at `members[0]`.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub members: Vec<String>,
}

impl Cycle {
    pub fn length(&self) -> usize {
        self.members.len()
    }
}

/// Canonical dedup key: the sorted multiset of member ids, joined by a
/// separator that cannot appear in an account id produced by the loader.
///
/// Per §9, this collapses A→B→C→A and A→C→B→A (direction-distinct cycles
/// over the same node set) into a single representative; that is
/// intentional, matching the reference behavior rather than a
/// rotation-invariant-but-direction-preserving canonicalization.
fn canonical_key(members: &[String]) -> String {
    let mut sorted: Vec<&str> = members.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join("\u{1f}")
}

/// Enumerates canonical simple directed cycles of length `min_length..=max_length`.
///
/// From each seed node (iterated in graph insertion order for determinism),
/// performs a depth-limited DFS over forward adjacency. Forward neighbors
/// are visited in sorted order at every step so that, combined with the
/// deterministic seed order, the set of *first-emitted* representatives per
/// canonical key is reproducible across runs (required for P6).
#[tracing::instrument(skip_all)]
pub fn detect_cycles(
    graph: &TransactionGraph,
    min_length: usize,
    max_length: usize,
) -> Vec<Cycle> {
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    for seed in graph.node_ids() {
        let mut path = vec![seed.clone()];
        let mut on_path: HashSet<String> = HashSet::new();
        on_path.insert(seed.clone());

        dfs(
            graph,
            seed,
            &mut path,
            &mut on_path,
            max_length,
            min_length,
            max_length,
            &mut seen_keys,
            &mut cycles,
        );
    }

    cycles
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    graph: &TransactionGraph,
    seed: &str,
    path: &mut Vec<String>,
    on_path: &mut HashSet<String>,
    remaining_depth: usize,
    min_length: usize,
    max_length: usize,
    seen_keys: &mut HashSet<String>,
    cycles: &mut Vec<Cycle>,
) {
    if remaining_depth == 0 {
        return;
    }

    let current = path.last().unwrap().clone();
    let mut neighbors: Vec<&String> = graph.forward_neighbors(&current).collect();
    neighbors.sort();

    for next in neighbors {
        if next == seed {
            // Closes a cycle back to the seed; length 2 (A->B->A) is never
            // reported, enforced by the path.len() >= min_length guard.
            if path.len() >= min_length && path.len() <= max_length {
                let key = canonical_key(path);
                if seen_keys.insert(key) {
                    cycles.push(Cycle {
                        members: path.clone(),
                    });
                }
            }
            continue;
        }

        if on_path.contains(next) || path.len() >= max_length {
            continue;
        }

        path.push(next.clone());
        on_path.insert(next.clone());

        dfs(
            graph,
            seed,
            path,
            on_path,
            remaining_depth - 1,
            min_length,
            max_length,
            seen_keys,
            cycles,
        );

        on_path.remove(next);
        path.pop();
    }
}

/// Shortest cycle length each member participates in, across all detected
/// cycles. Used by the scorer to pick the `cycle_length_{k}` tag (§4.R).
pub fn shortest_cycle_lengths(cycles: &[Cycle]) -> HashMap<String, usize> {
    let mut shortest: HashMap<String, usize> = HashMap::new();
    for cycle in cycles {
        for member in &cycle.members {
            shortest
                .entry(member.clone())
                .and_modify(|len| *len = (*len).min(cycle.length()))
                .or_insert_with(|| cycle.length());
        }
    }
    shortest
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
    fn detects_triangle_cycle() {
        let txs = vec![tx("T1", "A", "B", 0), tx("T2", "B", "C", 1), tx("T3", "C", "A", 2)];
        let graph = build_graph(&txs);
        let cycles = detect_cycles(&graph, 3, 5);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].length(), 3);
        let mut members = cycles[0].members.clone();
        members.sort();
        assert_eq!(members, vec!["A", "B", "C"]);
    }

    #[test]
    fn length_two_is_never_reported() {
        let txs = vec![tx("T1", "A", "B", 0), tx("T2", "B", "A", 1)];
        let graph = build_graph(&txs);
        let cycles = detect_cycles(&graph, 3, 5);
        assert!(cycles.is_empty());
    }

    #[test]
    fn length_six_is_never_reported() {
        let txs = vec![
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 1),
            tx("T3", "C", "D", 2),
            tx("T4", "D", "E", 3),
            tx("T5", "E", "F", 4),
            tx("T6", "F", "A", 5),
        ];
        let graph = build_graph(&txs);
        let cycles = detect_cycles(&graph, 3, 5);
        assert!(cycles.is_empty());
    }

    #[test]
    fn opposite_direction_cycles_collapse_to_one_representative() {
        // A->B->C->A and A->C->B->A share {A,B,C} but run opposite ways.
        let txs = vec![
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 1),
            tx("T3", "C", "A", 2),
            tx("T4", "A", "C", 3),
            tx("T5", "C", "B", 4),
            tx("T6", "B", "A", 5),
        ];
        let graph = build_graph(&txs);
        let cycles = detect_cycles(&graph, 3, 5);
        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn no_self_loop_false_cycle() {
        let txs = vec![tx("T1", "A", "A", 0)];
        let graph = build_graph(&txs);
        let cycles = detect_cycles(&graph, 3, 5);
        assert!(cycles.is_empty());
    }
}
