//! # Mule Ring Detector
//!
//! A graph-based money-muling and fraud-ring detection engine for batches of
//! financial transactions.
//!
//! ## Pipeline
//!
//! - **Graph Builder**: folds a transaction batch into an account/edge graph
//! - **Detectors**: simple-cycle enumeration, smurfing (fan-in/fan-out),
//!   shell-chain traversal, and transaction-velocity bursts
//! - **Scorer**: combines detector output into a bounded suspicion score per
//!   account
//! - **Payroll Filter**: suppresses fan-out false positives on regular
//!   disbursement senders
//! - **Ring Assembler**: groups flagged accounts into named fraud rings
//! - **Report Emitter**: projects the final state into the external report

pub mod config;
pub mod cycles;
pub mod engine;
pub mod error;
pub mod graph;
pub mod loader;
pub mod payroll;
pub mod report;
pub mod rings;
pub mod scorer;
pub mod shell;
pub mod smurfing;
pub mod types;
pub mod velocity;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{AnalysisError, EngineError};
pub use report::{Report, Summary, SuspiciousAccount};
pub use types::{AccountNode, FraudRing, PatternTag, RingPatternType, Transaction};
