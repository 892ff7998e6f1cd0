//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs named `{year}_day{day:02}.txt`
    #[arg(long, default_value = "~/.config/aoc/inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.year, None);
        assert!(args.tags.is_empty());
        assert_eq!(args.input_dir, PathBuf::from("~/.config/aoc/inputs"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(!args.quiet && !args.verbose);
    }

    #[test]
    fn test_filters_and_tags() {
        let args = Args::try_parse_from([
            "aoc",
            "-y",
            "2020",
            "-d",
            "23",
            "--tags",
            "ring,simulation",
            "--parallelize-by",
            "part",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2020));
        assert_eq!(args.day, Some(23));
        assert_eq!(args.tags, vec!["ring", "simulation"]);
        assert_eq!(args.parallelize_by, ParallelizeBy::Part);
    }

    #[test]
    fn test_rejects_out_of_range_day_and_part() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--day", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }
}
