//! Daily puzzle solver framework
//!
//! Each puzzle day is a type that knows how to parse its input once and how to
//! answer each of its parts from the parsed form. The framework wraps such a
//! type in a timed, type-erased instance and keeps every known day in a
//! registry keyed by year and day.
//!
//! # Overview
//!
//! - [`PuzzleParser`]: turns raw input into the day's parsed puzzle
//! - [`PartSolver<N>`]: answers part `N` from the parsed puzzle
//! - [`Solver`]: part dispatch, usually generated by `#[derive(AocSolver)]`
//! - [`DynSolver`]: object-safe handle with parse/solve timing
//! - [`SolverRegistry`]: `(year, day)` lookup, filled by hand or from plugins
//!   submitted by `#[derive(AutoRegisterSolver)]`
//!
//! # Example
//!
//! ```
//! use aoc_solver::{AocSolver, ParseError, PartSolver, PuzzleParser, RegistryBuilder, SolveError};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl PuzzleParser for Depths {
//!     type Puzzle<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::Puzzle<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(format!("bad depth {l:?}"))))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(depths: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
//!         Ok(depths.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(depths: &mut Self::Puzzle<'_>) -> Result<String, SolveError> {
//!         Ok(depths.iter().sum::<u32>().to_string())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_solver::<Depths>(2021, 1, &[])
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "1\n3\n2\n5").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! assert_eq!(solver.solve(2).unwrap().answer, "11");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, RegistryBuilder, SolverFactory, SolverPlugin, SolverRegistry,
};
pub use solver::{PartSolver, PuzzleParser, Solver, SolverExt};

// used by the derive macros
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
