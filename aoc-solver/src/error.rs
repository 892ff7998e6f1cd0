//! Error types for the solver framework

use thiserror::Error;

/// Error type for turning raw input into a parsed puzzle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input doesn't match the expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// Error type for answering one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The part is within range but has no implementation
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The part number is 0 or above the solver's part count
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for registry lookups and solver runs
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A solver is already registered for this year and day
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
}
