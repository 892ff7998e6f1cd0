//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AocSolver` for part
//! dispatch and `AutoRegisterSolver` to submit itself to the plugin registry,
//! so linking this crate is enough for `RegistryBuilder::register_all_plugins`
//! to find them.

pub mod year_2020;
