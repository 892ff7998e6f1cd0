//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::ExecutorError;
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Parse time of the instance that answered; None if parsing never ran
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// Executor state shared by reference with worker threads
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Year/day pairs among the work items with no input file
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        let inputs = &self.sync_executor_config.inputs;
        work_items
            .iter()
            .filter(|w| !inputs.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0, // Empty range - intentional
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    ///
    /// Results arrive in completion order; failures to read input or parse
    /// it are sent as error results. Only a closed channel stops the run.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;
        debug!(
            items = work_items.len(),
            parallelize_by = ?cfg.parallelize_by,
            "executing work items"
        );

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .try_for_each(|work| run_work_item(work, &tx, cfg)),
            ParallelizeBy::Year => {
                // Group by year, parallelize years using configured thread pool
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year.par_iter().try_for_each(|items| {
                        items
                            .iter()
                            .try_for_each(|work| run_work_item(work, &tx, cfg))
                    })
                })
            }
            // Part differs from Day inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .try_for_each(|work| run_work_item(work, &tx, cfg))
            }),
        }
    }
}

/// Read the input and solve every part of one work item
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ExecutorError> {
    let input = match cfg.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year = work.year, day = work.day, error = %e, "input unavailable");
            let message = e.to_string();
            return work.parts.clone().try_for_each(|part| {
                let error = SolverError::ParseError(ParseError::MissingData(message.clone()));
                send(tx, error_result(work.year, work.day, part, error))
            });
        }
    };

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        // Each part parses its own instance so parts can run side by side
        work.parts
            .clone()
            .into_par_iter()
            .try_for_each(|part| match cfg.registry.create_solver(work.year, work.day, &input) {
                Ok(mut solver) => send(tx, solve_part(work.year, work.day, part, &mut *solver)),
                Err(e) => send(tx, error_result(work.year, work.day, part, e)),
            })
    } else {
        match cfg.registry.create_solver(work.year, work.day, &input) {
            Ok(mut solver) => work
                .parts
                .clone()
                .try_for_each(|part| send(tx, solve_part(work.year, work.day, part, &mut *solver))),
            Err(e) => work.parts.clone().try_for_each(|part| {
                send(tx, error_result(work.year, work.day, part, replicate(&e)))
            }),
        }
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ExecutorError> {
    tx.send(result).map_err(|_| ExecutorError::ChannelSend)
}

/// Create an error result for a part that never got to run
fn error_result(year: u16, day: u8, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

/// Copy of a solver creation error, one per affected part
fn replicate(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        SolverError::InvalidYearDay(year, day) => SolverError::InvalidYearDay(*year, *day),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::SolveError(e) => SolverError::ParseError(ParseError::Other(e.to_string())),
    }
}

/// Solve a single part
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(e.into()),
            parse_duration,
            solve_duration: TimeDelta::zero(),
        },
    }
}
