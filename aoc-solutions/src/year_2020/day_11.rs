use aoc_sim::{Grid, NeighborStrategy, Rules};
use aoc_solver::{ParseError, PartSolver, PuzzleParser, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use super::{engine_failed, invalid_input, puzzle_lines};

/// Seating System
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["automaton", "grid"])]
pub struct Solver;

impl PuzzleParser for Solver {
    type Puzzle<'a> = Grid<2>;

    fn parse(input: &str) -> Result<Self::Puzzle<'_>, ParseError> {
        let rows = puzzle_lines(input);
        if rows.is_empty() {
            return Err(ParseError::MissingData("seat layout is empty".into()));
        }
        Grid::parse(rows).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(layout: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
        settle(layout, NeighborStrategy::Adjacent)
    }
}

impl PartSolver<2> for Solver {
    fn solve(layout: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
        settle(layout, NeighborStrategy::LineOfSight)
    }
}

/// Run a copy of the layout until nobody moves and count the occupied seats
fn settle(layout: &Grid<2>, strategy: NeighborStrategy) -> Result<String, SolveError> {
    let mut seats = layout.clone();
    let generations = seats
        .run_to_fixed_point(Rules::Seating(strategy))
        .map_err(engine_failed)?;
    debug!(?strategy, generations, "seats settled");
    Ok(seats.count_occupied().to_string())
}
