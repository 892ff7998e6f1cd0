use anyhow::anyhow;
use aoc_sim::{Grid, Rules};
use aoc_solver::{ParseError, PartSolver, PuzzleParser, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use super::{engine_failed, invalid_input, puzzle_lines};

/// Boot cycles run before counting
const CYCLES: usize = 6;

/// Conway Cubes
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["automaton", "grid", "parallel"])]
pub struct Solver;

impl PuzzleParser for Solver {
    /// The starting slice, reparsed into 3 or 4 dimensions by each part
    type Puzzle<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::Puzzle<'_>, ParseError> {
        let rows = puzzle_lines(input);
        if rows.is_empty() {
            return Err(ParseError::MissingData("initial slice is empty".into()));
        }

        rows.iter()
            .enumerate()
            .try_for_each(|(row, line)| match line.chars().position(|c| c != '.' && c != '#') {
                Some(col) => Err(anyhow!("(line {}) only '.' and '#' allowed, column {}", row + 1, col + 1)),
                None => Ok(()),
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        // shape check
        Grid::<3>::parse(&rows).map_err(invalid_input)?;
        Ok(rows)
    }
}

impl PartSolver<1> for Solver {
    fn solve(rows: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
        boot::<3>(rows)
    }
}

impl PartSolver<2> for Solver {
    fn solve(rows: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
        boot::<4>(rows)
    }
}

fn boot<const D: usize>(rows: &[&str]) -> Result<String, SolveError> {
    let mut cubes = Grid::<D>::parse(rows).map_err(engine_failed)?;
    cubes
        .run_generations(Rules::ActiveCubes, CYCLES)
        .map_err(engine_failed)?;
    Ok(cubes.count_active().to_string())
}
