//! Error types for the simulation engines

use thiserror::Error;

/// Error type shared by both engines
///
/// Every variant is fatal for the run that produced it: the simulations are
/// deterministic, so retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Invalid construction input or an unsupported rule/dimension combination
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Unrecognized or malformed grid input
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },
    /// A search that must succeed by construction did not
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
