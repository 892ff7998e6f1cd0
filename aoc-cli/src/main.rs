//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{RegistryBuilder, SolverRegistry};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{CliError, ExecutorError};
use executor::Executor;
use output::OutputFormatter;
use tracing::{Level, debug, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() {
        warn!(
            count = missing.len(),
            dir = %config.input_dir.display(),
            "some inputs are missing"
        );
        if !config.quiet {
            println!("Missing {} input file(s):", missing.len());
            for (year, day) in &missing {
                println!("  - {}/day{:02}", year, day);
            }
        }
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected = ResultKey::expected_from(&work_items);
    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    // Collect and display results in order
    let formatter = OutputFormatter::new(config.quiet);
    let mut aggregator = ResultAggregator::new(expected);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| ExecutorError::Panicked)??;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering; a solver must carry every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
