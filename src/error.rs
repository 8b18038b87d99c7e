//! Error kinds shared across the crate.
//!
//! Configuration and boundary errors abort at setup; during play the only
//! recoverable condition is an empty candidate set, which is not an error
//! (the strategy surfaces it as a certain-wrong word guess).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Set operation across bitsets of differing capacities.
    #[error("bitset capacity mismatch: {left} vs {right}")]
    CapacityMismatch { left: usize, right: usize },

    /// The evaluator reached a node it cannot execute. Complement must be
    /// rewritten away by the optimizer before evaluation.
    #[error("evaluator cannot execute operator: {0}")]
    UnknownOperator(&'static str),

    /// Rejected strategy configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A worker panicked while building the index.
    #[error("index build worker failed")]
    IndexBuildFailure,
}
