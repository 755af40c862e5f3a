//! Core data model: transactions, the account/edge graph, pattern tags, and fraud rings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single validated financial transaction, as handed to the engine.
///
/// The engine assumes all rows are already validated; malformed input is a
/// caller-side concern (see [`crate::error::AnalysisError`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Closed enumeration of structural fraud indicators a node can carry.
///
/// Ordering here is the canonical order in which tags must appear on a node
/// (invariant 4): cycles, then fan-in/fan-out, then shell-chain, then velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternTag {
    CycleLength3,
    CycleLength4,
    CycleLength5,
    FanIn,
    FanOut,
    ShellChain,
    HighVelocity,
}

impl PatternTag {
    pub fn cycle_length(length: usize) -> Self {
        match length {
            3 => PatternTag::CycleLength3,
            4 => PatternTag::CycleLength4,
            5 => PatternTag::CycleLength5,
            other => panic!("cycle length {other} outside supported range 3..=5"),
        }
    }

    /// Canonical rank used to sort a node's tag set into the order invariant
    /// 4 requires, regardless of the order in which detectors ran.
    fn rank(self) -> u8 {
        match self {
            PatternTag::CycleLength3 => 0,
            PatternTag::CycleLength4 => 1,
            PatternTag::CycleLength5 => 2,
            PatternTag::FanIn => 3,
            PatternTag::FanOut => 4,
            PatternTag::ShellChain => 5,
            PatternTag::HighVelocity => 6,
        }
    }
}

impl std::fmt::Display for PatternTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PatternTag::CycleLength3 => "cycle_length_3",
            PatternTag::CycleLength4 => "cycle_length_4",
            PatternTag::CycleLength5 => "cycle_length_5",
            PatternTag::FanIn => "fan_in",
            PatternTag::FanOut => "fan_out",
            PatternTag::ShellChain => "shell_chain",
            PatternTag::HighVelocity => "high_velocity",
        };
        write!(f, "{s}")
    }
}

/// An account node in the transaction graph, keyed by account id.
///
/// Created and counted by the graph builder; mutated only by the scorer,
/// the payroll filter, and the ring assembler (§3 lifecycle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountNode {
    pub id: String,
    pub total_transactions: usize,
    pub total_sent: f64,
    pub total_received: f64,
    pub unique_senders: BTreeSet<String>,
    pub unique_receivers: BTreeSet<String>,

    pub is_suspicious: bool,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<PatternTag>,
    pub ring_id: Option<String>,

    /// Shortest cycle length this node participates in, if any (for scoring).
    pub(crate) shortest_cycle_len: Option<usize>,
}

impl AccountNode {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            total_transactions: 0,
            total_sent: 0.0,
            total_received: 0.0,
            unique_senders: BTreeSet::new(),
            unique_receivers: BTreeSet::new(),
            is_suspicious: false,
            suspicion_score: 0.0,
            detected_patterns: Vec::new(),
            ring_id: None,
            shortest_cycle_len: None,
        }
    }

    /// Adds a tag if not already present, then restores the canonical order
    /// required by invariant 4.
    pub(crate) fn add_pattern(&mut self, tag: PatternTag) {
        if !self.detected_patterns.contains(&tag) {
            self.detected_patterns.push(tag);
            self.detected_patterns.sort_by_key(|t| t.rank());
        }
    }
}

/// A directed edge in the transaction multigraph. One transaction, one edge;
/// edges are never deduplicated.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub transaction_id: String,
}

/// Dominant pattern a fraud ring was assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingPatternType {
    Cycle,
    FanIn,
    FanOut,
    ShellChain,
}

/// A named group of accounts sharing a dominant fraud pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudRing {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: RingPatternType,
    pub risk_score: f64,
}
