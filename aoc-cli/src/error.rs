//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input store error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Solver error
    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Executor error
    #[error("{0}")]
    Executor(#[from] ExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Result receiver went away
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// The executor thread panicked
    #[error("Executor thread panicked")]
    Panicked,
}

/// Input store errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file for this year/day
    #[error("No input for {year}/{day:02} at {}", .path.display())]
    NotFound { year: u16, day: u8, path: PathBuf },

    /// Reading the input file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
