//! Graph Builder (§4.G): folds transactions into accounts, edges, and the
//! adjacency indices the detectors read.

use crate::types::{AccountNode, Edge};
use std::collections::{HashMap, HashSet};

/// The node table, edge list, and adjacency indices produced from a batch of
/// transactions.
///
/// Node order is insertion order of first appearance (deterministic, not
/// semantically meaningful) — `TransactionGraph` keeps that order in
/// `node_order` alongside a `node_index` lookup, since a plain `HashMap`
/// cannot offer both.
pub struct TransactionGraph {
    node_order: Vec<String>,
    node_index: HashMap<String, usize>,
    nodes: Vec<AccountNode>,

    edges: Vec<Edge>,
    /// Deduplicated forward adjacency: account -> distinct accounts it has sent to.
    forward: HashMap<String, HashSet<String>>,
    /// Deduplicated reverse adjacency: account -> distinct accounts it has received from.
    reverse: HashMap<String, HashSet<String>>,

    /// Indices into `edges`, grouped by sender, in insertion order.
    by_sender: HashMap<String, Vec<usize>>,
    /// Indices into `edges`, grouped by receiver, in insertion order.
    by_receiver: HashMap<String, Vec<usize>>,
}

impl TransactionGraph {
    fn ensure_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(AccountNode::new(id));
        self.node_order.push(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    pub fn nodes(&self) -> &[AccountNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [AccountNode] {
        &mut self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&AccountNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut AccountNode> {
        match self.node_index.get(id) {
            Some(&idx) => Some(&mut self.nodes[idx]),
            None => None,
        }
    }

    pub fn node_ids(&self) -> &[String] {
        &self.node_order
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn forward_neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.forward.get(id).into_iter().flatten()
    }

    pub fn reverse_neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.reverse.get(id).into_iter().flatten()
    }

    /// Outgoing edges for `id`, as a time-ordered sequence (ascending).
    pub fn outgoing_edges(&self, id: &str) -> Vec<&Edge> {
        self.by_sender
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.edges[idx])
            .collect()
    }

    /// Incoming edges for `id`, as a time-ordered sequence (ascending).
    pub fn incoming_edges(&self, id: &str) -> Vec<&Edge> {
        self.by_receiver
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.edges[idx])
            .collect()
    }

    pub fn account_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds a [`TransactionGraph`] from a batch of validated transactions.
///
/// Both endpoints of every transaction are ensured to exist before counters
/// are updated; self-loops (sender == receiver) are retained and contribute
/// to both the sent and received counters (§9).
#[tracing::instrument(skip_all, fields(batch_size = transactions.len()))]
pub fn build_graph(transactions: &[crate::types::Transaction]) -> TransactionGraph {
    let mut graph = TransactionGraph {
        node_order: Vec::new(),
        node_index: HashMap::new(),
        nodes: Vec::new(),
        edges: Vec::with_capacity(transactions.len()),
        forward: HashMap::new(),
        reverse: HashMap::new(),
        by_sender: HashMap::new(),
        by_receiver: HashMap::new(),
    };

    for tx in transactions {
        let sender_idx = graph.ensure_node(&tx.sender_id);
        let receiver_idx = graph.ensure_node(&tx.receiver_id);

        // A self-loop (sender == receiver) is one transaction, so it must
        // only increment total_transactions once even though it contributes
        // to both the sent and received sides (§9).
        let is_self_loop = sender_idx == receiver_idx;

        {
            let sender = &mut graph.nodes[sender_idx];
            if !is_self_loop {
                sender.total_transactions += 1;
            }
            sender.total_sent += tx.amount;
            sender.unique_receivers.insert(tx.receiver_id.clone());
        }
        {
            let receiver = &mut graph.nodes[receiver_idx];
            receiver.total_transactions += 1;
            receiver.total_received += tx.amount;
            receiver.unique_senders.insert(tx.sender_id.clone());
        }

        graph
            .forward
            .entry(tx.sender_id.clone())
            .or_default()
            .insert(tx.receiver_id.clone());
        graph
            .reverse
            .entry(tx.receiver_id.clone())
            .or_default()
            .insert(tx.sender_id.clone());

        let edge_idx = graph.edges.len();
        graph.edges.push(Edge {
            source: tx.sender_id.clone(),
            target: tx.receiver_id.clone(),
            amount: tx.amount,
            timestamp: tx.timestamp,
            transaction_id: tx.transaction_id.clone(),
        });
        graph
            .by_sender
            .entry(tx.sender_id.clone())
            .or_default()
            .push(edge_idx);
        graph
            .by_receiver
            .entry(tx.receiver_id.clone())
            .or_default()
            .push(edge_idx);
    }

    // Transactions may arrive in arbitrary order (§4.G input contract); sort
    // each account's edge index so window detectors can assume ascending
    // timestamps without re-sorting per query.
    for indices in graph.by_sender.values_mut() {
        indices.sort_by_key(|&idx| graph.edges[idx].timestamp);
    }
    for indices in graph.by_receiver.values_mut() {
        indices.sort_by_key(|&idx| graph.edges[idx].timestamp);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transaction;
    use chrono::{TimeZone, Utc};

    fn tx(id: &str, from: &str, to: &str, amount: f64, hour: u32) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn builds_nodes_and_edges() {
        let txs = vec![tx("T1", "A", "B", 100.0, 0), tx("T2", "B", "C", 50.0, 1)];
        let graph = build_graph(&txs);

        assert_eq!(graph.account_count(), 3);
        assert_eq!(graph.node_ids(), &["A".to_string(), "B".to_string(), "C".to_string()]);

        let a = graph.node("A").unwrap();
        assert_eq!(a.total_transactions, 1);
        assert_eq!(a.total_sent, 100.0);

        let b = graph.node("B").unwrap();
        assert_eq!(b.total_transactions, 2);
        assert_eq!(b.total_sent, 50.0);
        assert_eq!(b.total_received, 100.0);
    }

    #[test]
    fn self_loops_count_both_sides() {
        let txs = vec![tx("T1", "A", "A", 10.0, 0)];
        let graph = build_graph(&txs);

        let a = graph.node("A").unwrap();
        assert_eq!(a.total_transactions, 1);
        assert_eq!(a.total_sent, 10.0);
        assert_eq!(a.total_received, 10.0);
    }

    #[test]
    fn edges_sorted_by_timestamp_regardless_of_input_order() {
        let txs = vec![
            tx("T2", "A", "B", 20.0, 5),
            tx("T1", "A", "B", 10.0, 1),
        ];
        let graph = build_graph(&txs);
        let out = graph.outgoing_edges("A");
        assert_eq!(out[0].transaction_id, "T1");
        assert_eq!(out[1].transaction_id, "T2");
    }
}
