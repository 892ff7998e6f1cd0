//! Parser and part traits implemented by each puzzle day

use crate::error::{ParseError, SolveError};

/// Parsing half of a puzzle day
///
/// `Puzzle` is whatever the parts work from: an engine seeded from the input,
/// a list of numbers, or a borrowed `&'a str` when no transformation is
/// needed. Parts receive it mutably, so a day may cache intermediate results
/// in it for later parts.
pub trait PuzzleParser {
    type Puzzle<'a>;

    fn parse(input: &str) -> Result<Self::Puzzle<'_>, ParseError>;
}

/// Answers part `N` of a puzzle day
///
/// One impl per part; `#[derive(AocSolver)]` stitches them together into a
/// [`Solver`].
pub trait PartSolver<const N: u8>: PuzzleParser {
    fn solve(puzzle: &mut Self::Puzzle<'_>) -> Result<String, SolveError>;
}

/// Part dispatch for a puzzle day
///
/// Usually derived:
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// pub struct Solver;
/// ```
pub trait Solver: PuzzleParser {
    /// Number of parts this day has
    const PARTS: u8;

    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - No `PartSolver` for this part
    /// * `Err(SolveError::SolveFailed)` - Solving ran into an error
    fn solve_part(puzzle: &mut Self::Puzzle<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// [`Solver::solve_part`] after rejecting parts outside `1..=PARTS`
    fn solve_checked(puzzle: &mut Self::Puzzle<'_>, part: u8) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(puzzle, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
