//! Simulation engines for puzzle solutions
//!
//! Two independent engines live here:
//!
//! - [`CupRing`]: a circular singly-linked sequence of densely labeled cups with
//!   O(1) excise and splice, driving the cup game for millions of rounds.
//! - [`Grid`]: an N-dimensional cell automaton that stages every change of a
//!   generation before applying any of them, with seating rules (adjacent or
//!   line-of-sight neighbors) and Conway-style active cube rules.
//!
//! Neither engine does I/O. Callers parse their input, feed the initial state
//! in, and query the final state back out.
//!
//! # Example
//!
//! ```
//! use aoc_sim::{CupRing, Grid, NeighborStrategy, Rules};
//!
//! let mut ring = CupRing::new(&[3, 8, 9, 1, 2, 5, 4, 6, 7], None).unwrap();
//! ring.run_rounds(10).unwrap();
//! assert_eq!(ring.labels_after(1).unwrap(), vec![9, 2, 6, 5, 8, 3, 7, 4]);
//!
//! let mut seats = Grid::<2>::parse(["L.L", "LLL", "L.L"]).unwrap();
//! seats.run_to_fixed_point(Rules::Seating(NeighborStrategy::Adjacent)).unwrap();
//! assert!(seats.count_occupied() > 0);
//! ```

mod error;
pub mod grid;
pub mod ring;

pub use error::SimError;
pub use grid::{CellState, Grid, NeighborStrategy, Parallelism, PendingChange, Point, Rules};
pub use ring::CupRing;
