//! Timed solver instances

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};

/// Answer to one part with its solve timing
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub part: u8,
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// A parsed puzzle for one year/day, ready to answer its parts
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    puzzle: S::Puzzle<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input`, recording how long it took
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let puzzle = S::parse(input)?;
        let parse_end = Utc::now();
        debug!(
            year,
            day,
            micros = (parse_end - parse_start).num_microseconds(),
            "parsed input"
        );

        Ok(Self {
            year,
            day,
            puzzle,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`]
///
/// # Example
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {part}: {} (took {})", result.answer, result.duration());
///     }
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part` against the parsed puzzle
    ///
    /// Parts share the puzzle, so a later part sees whatever an earlier one
    /// cached in it.
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts this solver supports
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_checked(&mut self.puzzle, part)?;
        let solve_end = Utc::now();
        debug!(
            year = self.year,
            day = self.day,
            part,
            micros = (solve_end - solve_start).num_microseconds(),
            "solved part"
        );

        Ok(SolveResult {
            part,
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
