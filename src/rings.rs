//! Ring Assembler (§4.A): partitions flagged accounts into named fraud
//! rings, in the fixed pass order cycle -> fan-in -> fan-out -> shell, which
//! also fixes the ring-id assignment order (invariant 6).

use crate::cycles::Cycle;
use crate::error::AnalysisError;
use crate::graph::TransactionGraph;
use crate::types::{FraudRing, PatternTag, RingPatternType};
use std::collections::{HashMap, HashSet};

struct RingBuilder {
    id: usize,
    members: Vec<String>,
    member_set: HashSet<String>,
    pattern_type: RingPatternType,
}

/// Assigns rings for every flagged account, using `outputs_cycles` (the raw
/// detector output, unaffected by the payroll filter) for cycle merging and
/// the current node table (post-filter) for the fan-in/fan-out/shell passes.
#[tracing::instrument(skip_all)]
pub fn assemble_rings(
    graph: &mut TransactionGraph,
    outputs_cycles: &[Cycle],
) -> Result<Vec<FraudRing>, AnalysisError> {
    let mut next_id = 1usize;
    let mut builders: Vec<RingBuilder> = Vec::new();
    let mut assigned: HashMap<String, usize> = HashMap::new();
    let mut claimed: HashSet<String> = HashSet::new();

    // Pass 1: cycle rings. Each cycle merges into the ring containing any of
    // its members (first such member, in the cycle's own member order,
    // wins), or starts a new ring. Members accumulate transitively across
    // overlapping cycles that share a node.
    for cycle in outputs_cycles {
        let existing = cycle.members.iter().find_map(|m| assigned.get(m).copied());

        let builder_idx = match existing {
            Some(idx) => idx,
            None => {
                let idx = builders.len();
                builders.push(RingBuilder {
                    id: next_id,
                    members: Vec::new(),
                    member_set: HashSet::new(),
                    pattern_type: RingPatternType::Cycle,
                });
                next_id += 1;
                idx
            }
        };

        for member in &cycle.members {
            let builder = &mut builders[builder_idx];
            if builder.member_set.insert(member.clone()) {
                builder.members.push(member.clone());
            }
            assigned.insert(member.clone(), builder_idx);
        }
    }

    claimed.extend(assigned.keys().cloned());

    let mut rings: Vec<FraudRing> = Vec::new();
    for builder in &builders {
        rings.push(finish_ring(graph, builder)?);
    }

    // Passes 2-4: one ring each for fan-in, fan-out, and shell-chain
    // accounts not already claimed by an earlier pass, built over the
    // *current* (post-filter) tag state so payroll-exempted accounts are
    // correctly excluded.
    for (tag, pattern_type) in [
        (PatternTag::FanIn, RingPatternType::FanIn),
        (PatternTag::FanOut, RingPatternType::FanOut),
        (PatternTag::ShellChain, RingPatternType::ShellChain),
    ] {
        let members: Vec<String> = graph
            .node_ids()
            .iter()
            .filter(|id| !claimed.contains(*id))
            .filter(|id| {
                graph
                    .node(id)
                    .map(|n| n.is_suspicious && n.detected_patterns.contains(&tag))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if members.is_empty() {
            continue;
        }

        let builder = RingBuilder {
            id: next_id,
            member_set: members.iter().cloned().collect(),
            members: members.clone(),
            pattern_type,
        };
        next_id += 1;

        claimed.extend(builder.members.iter().cloned());

        rings.push(finish_ring(graph, &builder)?);
    }

    for node in graph.nodes_mut() {
        if let Some(ring) = rings.iter().find(|r| r.member_accounts.contains(&node.id)) {
            node.ring_id = Some(ring.ring_id.clone());
        }
    }

    validate_invariants(graph, &rings)?;

    Ok(rings)
}

fn finish_ring(
    graph: &TransactionGraph,
    builder: &RingBuilder,
) -> Result<FraudRing, AnalysisError> {
    let scores: Vec<f64> = builder
        .members
        .iter()
        .map(|id| {
            graph
                .node(id)
                .map(|n| n.suspicion_score)
                .ok_or_else(|| AnalysisError::InvariantViolation(format!("ring member {id} missing from node table")))
        })
        .collect::<Result<_, _>>()?;

    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    Ok(FraudRing {
        ring_id: format!("RING_{:03}", builder.id),
        member_accounts: builder.members.clone(),
        pattern_type: builder.pattern_type,
        risk_score: (mean * 10.0).round() / 10.0,
    })
}

fn validate_invariants(graph: &TransactionGraph, rings: &[FraudRing]) -> Result<(), AnalysisError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for ring in rings {
        for member in &ring.member_accounts {
            if !seen.insert(member.as_str()) {
                return Err(AnalysisError::InvariantViolation(format!(
                    "account {member} assigned to more than one ring"
                )));
            }
        }
    }

    let ring_ids: HashSet<&str> = rings.iter().map(|r| r.ring_id.as_str()).collect();
    for node in graph.nodes() {
        if let Some(ref ring_id) = node.ring_id {
            if !ring_ids.contains(ring_id.as_str()) {
                return Err(AnalysisError::InvariantViolation(format!(
                    "node {} references unknown ring {ring_id}",
                    node.id
                )));
            }
        }
    }

    Ok(())
}
