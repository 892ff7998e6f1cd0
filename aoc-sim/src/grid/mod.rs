//! Synchronous cell automaton over 2D, 3D or 4D grids
//!
//! A generation runs in two phases. [`Grid::stage`] evaluates every candidate
//! cell against the current, unmodified grid and collects the resulting
//! [`PendingChange`]s; [`Grid::apply`] then writes the whole batch. No cell
//! ever sees a neighbor that was updated in the same generation, so the order
//! in which candidates are visited (or the thread that visits them) cannot
//! change the outcome.
//!
//! Two rule sets are supported:
//!
//! - [`Rules::Seating`]: bounded seat layouts. Empty seats fill when no
//!   occupied seat is visible; occupied seats empty when too many are. The
//!   [`NeighborStrategy`] decides what "visible" means.
//! - [`Rules::ActiveCubes`]: unbounded Conway-style cubes. Every coordinate is
//!   a cube, floor included; the search space grows one cell past the active
//!   extent each generation.

mod cell;
mod point;

use std::collections::{HashMap, HashSet};
use std::fmt;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::SimError;
use point::{Bounds, neighbor_offsets};

pub use cell::CellState;
pub use point::Point;

/// How seat neighbors are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborStrategy {
    /// The Moore neighborhood: 8 cells in 2D, 26 in 3D, 80 in 4D
    Adjacent,
    /// The first seat in each of the 8 planar directions, looking past floor
    LineOfSight,
}

impl NeighborStrategy {
    /// Occupied neighbors at which an occupied seat is vacated
    pub fn tolerance(self) -> usize {
        match self {
            NeighborStrategy::Adjacent => 4,
            NeighborStrategy::LineOfSight => 5,
        }
    }
}

/// Transition rules applied by a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rules {
    /// Empty becomes occupied with no occupied neighbors; occupied becomes
    /// empty at or above the strategy's tolerance. Floor never changes.
    Seating(NeighborStrategy),
    /// Active stays active with 2 or 3 active neighbors; inactive becomes
    /// active with exactly 3.
    ActiveCubes,
}

/// Whether a generation's staging runs on the rayon pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Parallel for [`Rules::ActiveCubes`], sequential for seating
    #[default]
    Auto,
    Sequential,
    Parallel,
}

/// A staged state change for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingChange<const D: usize> {
    pub point: Point<D>,
    pub state: CellState,
}

/// Sparse grid of cell states
///
/// # Example
///
/// ```
/// use aoc_sim::{Grid, Rules};
///
/// let mut cubes = Grid::<3>::parse([".#.", "..#", "###"]).unwrap();
/// cubes.run_generations(Rules::ActiveCubes, 6).unwrap();
/// assert_eq!(cubes.count_active(), 112);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<const D: usize> {
    cells: HashMap<Point<D>, CellState>,
    parallelism: Parallelism,
    generations: usize,
}

impl<const D: usize> Grid<D> {
    /// Parse rows of `.`, `L` and `#` onto the `z = w = 0` plane
    ///
    /// Row `y` of the input becomes cells `(0..width, y)`.
    ///
    /// # Errors
    /// - `SimError::Configuration` if `D < 2`
    /// - `SimError::Parse` on an unknown character or a row whose length
    ///   differs from the first row (rows are zero-based)
    pub fn parse<I, S>(rows: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if D < 2 {
            return Err(SimError::Configuration(format!(
                "grids need at least 2 dimensions, got {D}"
            )));
        }

        let mut cells = HashMap::new();
        let mut width = None;
        for (y, row) in rows.into_iter().enumerate() {
            let mut row_width = 0;
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let state = CellState::try_from(symbol).map_err(|found| SimError::Parse {
                    row: y,
                    message: format!("unexpected character {found:?} at column {x}"),
                })?;
                cells.insert(Point::planar(x as i32, y as i32), state);
                row_width = x + 1;
            }

            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(SimError::Parse {
                        row: y,
                        message: format!("expected {expected} cells, found {row_width}"),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            cells,
            parallelism: Parallelism::default(),
            generations: 0,
        })
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// State at `point`, `None` outside the populated cells
    pub fn state(&self, point: &Point<D>) -> Option<CellState> {
        self.cells.get(point).copied()
    }

    pub fn count_occupied(&self) -> usize {
        self.cells.values().filter(|s| s.is_occupied()).count()
    }

    /// Same as [`count_occupied`](Self::count_occupied), named for cube rules
    pub fn count_active(&self) -> usize {
        self.count_occupied()
    }

    /// Generations stepped so far
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Run one generation, returning whether any cell changed
    pub fn step(&mut self, rules: Rules) -> Result<bool, SimError> {
        let changes = self.stage(rules)?;
        let changed = !changes.is_empty();
        trace!(
            generation = self.generations + 1,
            changes = changes.len(),
            "generation staged"
        );
        self.apply(changes)?;
        self.generations += 1;
        Ok(changed)
    }

    /// Step until a generation changes nothing
    ///
    /// Returns the generations executed, the final unchanged one included.
    ///
    /// # Errors
    /// `SimError::Configuration` for [`Rules::ActiveCubes`]: cube patterns
    /// can oscillate or grow forever, use
    /// [`run_generations`](Self::run_generations) for those.
    pub fn run_to_fixed_point(&mut self, rules: Rules) -> Result<usize, SimError> {
        if rules == Rules::ActiveCubes {
            return Err(SimError::Configuration(
                "active cubes have no guaranteed fixed point, run a fixed number of generations"
                    .into(),
            ));
        }
        debug!(?rules, cells = self.cells.len(), "running to fixed point");
        let mut executed = 0;
        loop {
            executed += 1;
            if !self.step(rules)? {
                break;
            }
        }
        debug!(
            generations = executed,
            occupied = self.count_occupied(),
            "fixed point reached"
        );
        Ok(executed)
    }

    /// Step exactly `generations` times
    pub fn run_generations(&mut self, rules: Rules, generations: usize) -> Result<(), SimError> {
        debug!(?rules, generations, "running generations");
        for _ in 0..generations {
            self.step(rules)?;
        }
        debug!(occupied = self.count_occupied(), "generations finished");
        Ok(())
    }

    /// Compute the next generation's changes without touching the grid
    ///
    /// # Errors
    /// `SimError::Configuration` for line-of-sight seating on a grid that is
    /// not 2D.
    pub fn stage(&self, rules: Rules) -> Result<Vec<PendingChange<D>>, SimError> {
        let offsets = neighbor_offsets::<D>();
        let parallel = match self.parallelism {
            Parallelism::Auto => rules == Rules::ActiveCubes,
            Parallelism::Sequential => false,
            Parallelism::Parallel => true,
        };

        match rules {
            Rules::Seating(strategy) => {
                if strategy == NeighborStrategy::LineOfSight && D != 2 {
                    return Err(SimError::Configuration(format!(
                        "line-of-sight seating needs a 2D grid, got {D}D"
                    )));
                }

                let seats: Vec<(Point<D>, CellState)> = self
                    .cells
                    .iter()
                    .filter(|(_, state)| **state != CellState::Floor)
                    .map(|(point, state)| (*point, *state))
                    .collect();

                let evaluate = |&(point, state): &(Point<D>, CellState)| {
                    self.seat_change(point, state, strategy, &offsets)
                };
                Ok(if parallel {
                    seats.par_iter().filter_map(evaluate).collect()
                } else {
                    seats.iter().filter_map(evaluate).collect()
                })
            }
            Rules::ActiveCubes => {
                let active = self
                    .cells
                    .iter()
                    .filter(|(_, state)| state.is_occupied())
                    .map(|(point, _)| *point);
                let Some(search) = Bounds::enclosing(active).map(|b| b.expanded(1)) else {
                    return Ok(Vec::new());
                };

                // slices along the outermost axis only read the grid, so they
                // can be evaluated independently
                let outer = D - 1;
                let evaluate_slice = |value: i32| -> Vec<PendingChange<D>> {
                    search
                        .slice(outer, value)
                        .points()
                        .filter_map(|point| self.cube_change(point, &offsets))
                        .collect()
                };
                Ok(if parallel {
                    search
                        .axis(outer)
                        .into_par_iter()
                        .flat_map_iter(evaluate_slice)
                        .collect()
                } else {
                    search.axis(outer).flat_map(evaluate_slice).collect()
                })
            }
        }
    }

    /// Write a staged batch
    ///
    /// The whole batch is checked before any cell is written, so a rejected
    /// batch leaves the grid as it was.
    ///
    /// # Errors
    /// `SimError::InvariantViolation` if a change does not toggle its cell
    /// (occupying an occupied cell, vacating a cell that is not occupied,
    /// staging floor) or if two changes target the same cell.
    pub fn apply<I>(&mut self, changes: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = PendingChange<D>>,
    {
        let changes: Vec<PendingChange<D>> = changes.into_iter().collect();

        let mut seen = HashSet::with_capacity(changes.len());
        for &PendingChange { point, state } in &changes {
            if !seen.insert(point) {
                return Err(SimError::InvariantViolation(format!(
                    "cell {:?} staged more than once in one generation",
                    point.0
                )));
            }
            let previous = self.state(&point).unwrap_or_default();
            let toggles = match state {
                CellState::Occupied => !previous.is_occupied(),
                CellState::Empty => previous.is_occupied(),
                CellState::Floor => false,
            };
            if !toggles {
                return Err(SimError::InvariantViolation(format!(
                    "staged change {previous:?} -> {state:?} at {:?} does not toggle the cell",
                    point.0
                )));
            }
        }

        self.cells
            .extend(changes.into_iter().map(|PendingChange { point, state }| (point, state)));
        Ok(())
    }

    fn seat_change(
        &self,
        point: Point<D>,
        state: CellState,
        strategy: NeighborStrategy,
        offsets: &[[i32; D]],
    ) -> Option<PendingChange<D>> {
        let occupied = match strategy {
            NeighborStrategy::Adjacent => offsets
                .iter()
                .filter(|delta| self.is_occupied(&point.offset(delta)))
                .count(),
            NeighborStrategy::LineOfSight => offsets
                .iter()
                .filter(|delta| self.first_seat_in_sight(point, delta) == Some(CellState::Occupied))
                .count(),
        };

        let state = match state {
            CellState::Empty if occupied == 0 => CellState::Occupied,
            CellState::Occupied if occupied >= strategy.tolerance() => CellState::Empty,
            _ => return None,
        };
        Some(PendingChange { point, state })
    }

    /// First non-floor cell from `from` along `direction`, `None` once the ray
    /// leaves the populated cells
    fn first_seat_in_sight(&self, from: Point<D>, direction: &[i32; D]) -> Option<CellState> {
        let mut at = from.offset(direction);
        loop {
            match self.cells.get(&at)? {
                CellState::Floor => at = at.offset(direction),
                seat => return Some(*seat),
            }
        }
    }

    fn cube_change(&self, point: Point<D>, offsets: &[[i32; D]]) -> Option<PendingChange<D>> {
        let active = self.is_occupied(&point);
        let neighbors = offsets
            .iter()
            .filter(|delta| self.is_occupied(&point.offset(delta)))
            .count();

        let state = match (active, neighbors) {
            (true, 2 | 3) => return None,
            (true, _) => CellState::Empty,
            (false, 3) => CellState::Occupied,
            (false, _) => return None,
        };
        Some(PendingChange { point, state })
    }

    fn is_occupied(&self, point: &Point<D>) -> bool {
        self.cells.get(point).is_some_and(|s| s.is_occupied())
    }
}

/// Renders the populated extent in the input alphabet, one row per line
impl fmt::Display for Grid<2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bounds) = Bounds::enclosing(self.cells.keys().copied()) else {
            return Ok(());
        };
        for y in bounds.axis(1) {
            for x in bounds.axis(0) {
                let state = self.state(&Point([x, y])).unwrap_or_default();
                write!(f, "{}", state.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEATS: &str = "\
L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL";

    const CUBES: &str = ".#.\n..#\n###";

    fn seats() -> Grid<2> {
        Grid::parse(SEATS.lines()).unwrap()
    }

    #[test]
    fn test_parse_keeps_layout() {
        let grid = seats();
        assert_eq!(grid.to_string(), format!("{SEATS}\n"));
        assert_eq!(grid.state(&Point([1, 0])), Some(CellState::Floor));
        assert_eq!(grid.state(&Point([0, 0])), Some(CellState::Empty));
        assert_eq!(grid.state(&Point([10, 0])), None);
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        let err = Grid::<2>::parse(["L.L", "LxL"]).unwrap_err();
        assert!(matches!(err, SimError::Parse { row: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = Grid::<2>::parse(["L.L", "LL"]).unwrap_err();
        assert!(matches!(err, SimError::Parse { row: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_one_dimension() {
        assert!(matches!(Grid::<1>::parse(["L"]), Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_first_adjacent_generation_fills_every_seat() {
        let mut grid = seats();
        assert!(grid.step(Rules::Seating(NeighborStrategy::Adjacent)).unwrap());
        assert_eq!(grid.to_string(), format!("{}\n", SEATS.replace('L', "#")));
    }

    #[test]
    fn test_second_adjacent_generation() {
        let mut grid = seats();
        let rules = Rules::Seating(NeighborStrategy::Adjacent);
        grid.step(rules).unwrap();
        grid.step(rules).unwrap();
        let expected = "\
#.LL.L#.##
#LLLLLL.L#
L.L.L..L..
#LLL.LL.L#
#.LL.LL.LL
#.LLLL#.##
..L.L.....
#LLLLLLLL#
#.LLLLLL.L
#.#LLLL.##
";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn test_adjacent_fixed_point() {
        let mut grid = seats();
        let generations = grid
            .run_to_fixed_point(Rules::Seating(NeighborStrategy::Adjacent))
            .unwrap();
        assert_eq!(grid.count_occupied(), 37);
        assert_eq!(grid.generations(), generations);
        assert!(generations > 2);
    }

    #[test]
    fn test_line_of_sight_fixed_point() {
        let mut grid = seats();
        let generations = grid
            .run_to_fixed_point(Rules::Seating(NeighborStrategy::LineOfSight))
            .unwrap();
        assert_eq!(grid.count_occupied(), 26);
        assert_eq!(grid.generations(), generations);
    }

    #[test]
    fn test_line_of_sight_looks_past_floor() {
        let grid = Grid::<2>::parse([
            ".......#.",
            "...#.....",
            ".#.......",
            ".........",
            "..#L....#",
            "....#....",
            ".........",
            "#........",
            "...#.....",
        ])
        .unwrap();
        let center = Point([3, 4]);
        let offsets = neighbor_offsets::<2>();
        let seen = offsets
            .iter()
            .filter(|d| grid.first_seat_in_sight(center, d) == Some(CellState::Occupied))
            .count();
        assert_eq!(seen, 8);
    }

    #[test]
    fn test_line_of_sight_blocked_by_empty_seat() {
        let grid = Grid::<2>::parse([".............", ".L.L.#.#.#.#.", "............."]).unwrap();
        let seen = neighbor_offsets::<2>()
            .iter()
            .filter(|d| grid.first_seat_in_sight(Point([1, 1]), d) == Some(CellState::Occupied))
            .count();
        assert_eq!(seen, 0);
    }

    #[test]
    fn test_line_of_sight_rejected_beyond_2d() {
        let mut grid = Grid::<3>::parse(["L.L"]).unwrap();
        let err = grid
            .step(Rules::Seating(NeighborStrategy::LineOfSight))
            .unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
        assert_eq!(grid.generations(), 0);
    }

    #[test]
    fn test_step_after_fixed_point_changes_nothing() {
        let rules = Rules::Seating(NeighborStrategy::Adjacent);
        let mut grid = seats();
        grid.run_to_fixed_point(rules).unwrap();
        let settled = grid.clone();
        assert!(!grid.step(rules).unwrap());
        assert_eq!(grid.cells, settled.cells);
    }

    #[test]
    fn test_cubes_3d() {
        let mut grid = Grid::<3>::parse(CUBES.lines()).unwrap();
        grid.step(Rules::ActiveCubes).unwrap();
        assert_eq!(grid.count_active(), 11);
        grid.run_generations(Rules::ActiveCubes, 5).unwrap();
        assert_eq!(grid.count_active(), 112);
    }

    #[test]
    fn test_cubes_4d() {
        let mut grid = Grid::<4>::parse(CUBES.lines()).unwrap();
        grid.run_generations(Rules::ActiveCubes, 6).unwrap();
        assert_eq!(grid.count_active(), 848);
    }

    #[test]
    fn test_cubes_sequential_matches_parallel() {
        let mut sequential = Grid::<3>::parse(CUBES.lines())
            .unwrap()
            .with_parallelism(Parallelism::Sequential);
        let mut parallel = Grid::<3>::parse(CUBES.lines())
            .unwrap()
            .with_parallelism(Parallelism::Parallel);
        for _ in 0..3 {
            sequential.step(Rules::ActiveCubes).unwrap();
            parallel.step(Rules::ActiveCubes).unwrap();
            assert_eq!(sequential.cells, parallel.cells);
        }
    }

    #[test]
    fn test_empty_cube_space_stays_empty() {
        let mut grid = Grid::<3>::parse(["...", "..."]).unwrap();
        assert!(!grid.step(Rules::ActiveCubes).unwrap());
        assert_eq!(grid.count_active(), 0);
    }

    #[test]
    fn test_apply_rejects_non_toggling_change() {
        let mut grid = seats();
        let floor = PendingChange {
            point: Point([1, 0]),
            state: CellState::Empty,
        };
        assert!(matches!(grid.apply([floor]), Err(SimError::InvariantViolation(_))));

        let mut grid = seats();
        let occupy_twice = PendingChange {
            point: Point([0, 0]),
            state: CellState::Occupied,
        };
        assert!(matches!(
            grid.apply([occupy_twice, occupy_twice]),
            Err(SimError::InvariantViolation(_))
        ));
        assert_eq!(grid.cells, seats().cells);
    }

    #[test]
    fn test_rejected_batch_leaves_grid_untouched() {
        let mut grid = Grid::<2>::parse(["LL"]).unwrap();
        let before = grid.clone();
        let batch = [
            PendingChange {
                point: Point([0, 0]),
                state: CellState::Occupied,
            },
            PendingChange {
                point: Point([1, 0]),
                state: CellState::Empty,
            },
        ];

        assert!(matches!(grid.apply(batch), Err(SimError::InvariantViolation(_))));
        assert_eq!(grid, before);
        assert_eq!(grid.state(&Point([0, 0])), Some(CellState::Empty));
    }

    #[test]
    fn test_fixed_point_rejected_for_cubes() {
        let mut blinker = Grid::<2>::parse(["...", "###", "..."]).unwrap();
        let before = blinker.clone();

        let err = blinker.run_to_fixed_point(Rules::ActiveCubes).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
        assert_eq!(blinker, before);

        blinker.run_generations(Rules::ActiveCubes, 2).unwrap();
        assert_eq!(blinker.count_active(), 3);
    }
}
