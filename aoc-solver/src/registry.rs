//! Solver registry keyed by year and day

use tracing::debug;

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years covered by the flat storage (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if !(BASE_YEAR..BASE_YEAR + MAX_YEARS as u16).contains(&year) {
        return None;
    }
    if day == 0 || day as usize > DAYS_PER_YEAR {
        return None;
    }
    Some((year - BASE_YEAR) as usize * DAYS_PER_YEAR + (day - 1) as usize)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Parses input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
    pub tags: &'static [&'static str],
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
    tags: &'static [&'static str],
}

/// Builder for a [`SolverRegistry`]
///
/// Rejects a second solver for the same year and day.
pub struct RegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory with an explicit part count
    ///
    /// # Errors
    /// - `RegistrationError::InvalidYearDay` outside 2015-2034 / days 1-25
    /// - `RegistrationError::DuplicateSolver` if the slot is taken
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        tags: &'static [&'static str],
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        self.entries[index] = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
            tags,
        });
        Ok(self)
    }

    /// Register a [`Solver`] type
    pub fn register_solver<S>(
        self,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register(year, day, S::PARTS, tags, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register every plugin submitted through `inventory`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins `filter` accepts
    ///
    /// ```no_run
    /// # use aoc_solver::RegistryBuilder;
    /// let registry = RegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2020 && plugin.tags.contains(&"automaton"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                debug!(
                    year = plugin.year,
                    day = plugin.day,
                    parts = plugin.solver.parts(),
                    tags = ?plugin.tags,
                    "registering plugin"
                );
                self = plugin
                    .solver
                    .register_with(self, plugin.year, plugin.day, plugin.tags)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable `(year, day)` → solver lookup
pub struct SolverRegistry {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistry {
    /// Parse `input` with the solver registered for `year`/`day`
    ///
    /// # Errors
    /// - `SolverError::InvalidYearDay` / `SolverError::NotFound` for unknown days
    /// - `SolverError::ParseError` if the input doesn't parse
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self.entries[index]
            .as_ref()
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    /// Metadata for every registered solver, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(index);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                    tags: e.tags,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        let entry = self.entries.get(calc_index(year, day)?)?.as_ref()?;
        Some(FactoryInfo {
            year,
            day,
            parts: entry.parts,
            tags: entry.tags,
        })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type-erased registration hook stored in a [`SolverPlugin`]
///
/// Every [`Solver`] gets it through a blanket impl.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<RegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day, tags)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for automatic registration
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels for filtering, e.g. `"ring"`, `"automaton"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);
