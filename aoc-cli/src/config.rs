//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Input directory with `~` expanded
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let Some(path_str) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = match path_str.strip_prefix('~') {
        Some("") => "",
        Some(rest) => match rest.strip_prefix('/') {
            Some(rest) => rest,
            None => return path.to_path_buf(),
        },
        None => return path.to_path_buf(),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(expand_tilde(Path::new("~/inputs")), home.join("inputs"));
        assert_eq!(expand_tilde(Path::new("/tmp/inputs")), PathBuf::from("/tmp/inputs"));
        assert_eq!(expand_tilde(Path::new("~other/x")), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde(Path::new("inputs/~")), PathBuf::from("inputs/~"));
    }

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from([
            "aoc",
            "--year",
            "2020",
            "--part",
            "2",
            "--threads",
            "3",
            "--input-dir",
            "/data/aoc",
            "-q",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.year_filter, Some(2020));
        assert_eq!(config.day_filter, None);
        assert_eq!(config.part_filter, Some(2));
        assert_eq!(config.thread_count, 3);
        assert_eq!(config.input_dir, PathBuf::from("/data/aoc"));
        assert!(config.quiet);
    }

    #[test]
    fn test_default_thread_count() {
        let config = Config::from_args(Args::try_parse_from(["aoc"]).unwrap()).unwrap();
        assert!(config.thread_count >= 1);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let args = Args::try_parse_from(["aoc", "--threads", "0"]).unwrap();
        assert!(matches!(Config::from_args(args), Err(CliError::Config(_))));
    }
}
