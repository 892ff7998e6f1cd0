//! 2020: seating automaton (11), active cubes (17), crab cups (23)

pub mod day_11;
pub mod day_17;
pub mod day_23;

use aoc_sim::SimError;
use aoc_solver::{ParseError, SolveError};

/// Engine rejected the input while it was being parsed
pub(crate) fn invalid_input(err: SimError) -> ParseError {
    ParseError::InvalidFormat(err.to_string())
}

/// Engine failed while a part was running
pub(crate) fn engine_failed(err: SimError) -> SolveError {
    SolveError::SolveFailed(Box::new(err))
}

/// Non-blank lines with trailing whitespace (and `\r`) removed
pub(crate) fn puzzle_lines(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect()
}
