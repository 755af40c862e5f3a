//! Centralized tuning constants for the analysis engine (§6).
//!
//! Defaults are fixed for bit-exact output across runs (invariant P6); do
//! not change them without updating the pinned-defaults regression test in
//! `tests/scenarios.rs`.

/// Tuning constants controlling every detector and the payroll filter.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Minimum distinct counterparties within the smurf window to flag
    /// fan-in / fan-out (§4.S).
    pub smurf_threshold: usize,
    /// Width of the smurfing sliding window, in hours.
    pub smurf_window_hours: i64,
    /// Minimum path length (edge count) for a shell chain to be flagged (§4.H).
    pub shell_min_hops: usize,
    /// Depth cap on the shell-chain traversal (§4.H algorithm).
    pub shell_max_depth: usize,
    /// Inclusive upper bound on `total_transactions` for a shell intermediate.
    pub shell_max_intermediate_tx: usize,
    /// Inclusive lower bound on `total_transactions` for a shell intermediate.
    pub shell_min_intermediate_tx: usize,
    /// Minimum outbound transactions within the velocity window to flag (§4.V).
    pub velocity_threshold: usize,
    /// Width of the velocity sliding window, in hours.
    pub velocity_window_hours: i64,
    /// Maximum simple cycle length enumerated (§4.C).
    pub cycle_max_length: usize,
    /// Minimum simple cycle length enumerated (§4.C).
    pub cycle_min_length: usize,
    /// Minimum outbound transaction count for the payroll predicate (§4.F).
    pub payroll_min_count: usize,
    /// Strict upper bound on coefficient of variation for the payroll
    /// predicate; a CV equal to this value is NOT exempted (§4.F, §8).
    pub payroll_cv_cap: f64,

    pub score_cycle: f64,
    pub score_fan_in: f64,
    pub score_fan_out: f64,
    pub score_shell_chain: f64,
    pub score_high_velocity: f64,
    pub max_score: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smurf_threshold: 10,
            smurf_window_hours: 72,
            shell_min_hops: 3,
            shell_max_depth: 6,
            shell_max_intermediate_tx: 3,
            shell_min_intermediate_tx: 2,
            velocity_threshold: 20,
            velocity_window_hours: 24,
            cycle_max_length: 5,
            cycle_min_length: 3,
            payroll_min_count: 10,
            payroll_cv_cap: 0.05,

            score_cycle: 40.0,
            score_fan_in: 25.0,
            score_fan_out: 25.0,
            score_shell_chain: 20.0,
            score_high_velocity: 10.0,
            max_score: 100.0,
        }
    }
}
