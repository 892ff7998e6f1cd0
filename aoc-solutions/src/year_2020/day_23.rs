use anyhow::anyhow;
use aoc_sim::CupRing;
use aoc_solver::{ParseError, PartSolver, PuzzleParser, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use super::{engine_failed, invalid_input};

const SHORT_GAME_ROUNDS: usize = 100;
const LONG_GAME_CUPS: u32 = 1_000_000;
const LONG_GAME_ROUNDS: usize = 10_000_000;

/// Crab Cups
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["ring", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct Cups {
    labels: Vec<u32>,
    /// The labels as given, ready to play the short game
    ring: CupRing,
}

impl PuzzleParser for Solver {
    type Puzzle<'a> = Cups;

    fn parse(input: &str) -> Result<Self::Puzzle<'_>, ParseError> {
        let digits = input.trim();
        if digits.is_empty() {
            return Err(ParseError::MissingData("no cup labels".into()));
        }

        let labels = digits
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                c.to_digit(10)
                    .ok_or_else(|| anyhow!("(position {}) expected a digit, found {:?}", idx + 1, c))
            })
            .collect::<Result<Vec<u32>, anyhow::Error>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        let ring = CupRing::new(&labels, None).map_err(invalid_input)?;
        Ok(Cups { labels, ring })
    }
}

impl PartSolver<1> for Solver {
    fn solve(cups: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
        let mut ring = cups.ring.clone();
        ring.run_rounds(SHORT_GAME_ROUNDS).map_err(engine_failed)?;
        debug!(%ring, "short game finished");

        Ok(ring
            .labels_after(1)
            .map_err(engine_failed)?
            .iter()
            .map(u32::to_string)
            .collect())
    }
}

impl PartSolver<2> for Solver {
    fn solve(cups: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
        let mut ring = CupRing::new(&cups.labels, Some(LONG_GAME_CUPS)).map_err(engine_failed)?;
        ring.run_rounds(LONG_GAME_ROUNDS).map_err(engine_failed)?;

        Ok(ring.product_of_two_after(1).map_err(engine_failed)?.to_string())
    }
}
