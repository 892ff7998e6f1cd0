//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Print one result; answers go to stdout, errors to stderr
    pub fn print_result(&self, result: &SolverResult) {
        let line = if self.quiet {
            format_quiet(result)
        } else {
            format_full(result)
        };
        match &result.answer {
            Ok(_) => println!("{line}"),
            Err(_) => eprintln!("{line}"),
        }
    }

    /// Print a summary after all results
    ///
    /// Shows both total solve time (sum of durations) and actual elapsed
    /// wall-clock time.
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed_time));
        if !elapsed_time.is_zero() {
            let compute_secs = (summary.parse_time + summary.solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed_time.as_secs_f64());
        }
    }
}

/// Totals over successful results
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    solved: usize,
    failed: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn of(results: &[SolverResult]) -> Self {
        let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
        Self {
            solved: solved.len(),
            failed: results.len() - solved.len(),
            parse_time: solved.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: solved.iter().map(|r| r.solve_duration).sum(),
        }
    }
}

fn format_quiet(result: &SolverResult) -> String {
    match &result.answer {
        Ok(answer) => answer.clone(),
        Err(e) => format!("Error: {e}"),
    }
}

fn format_full(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{prefix}: {answer} ({parse_timing}solve: {})",
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{prefix}: Error - {e}"),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    match TimeDelta::from_std(d) {
        Ok(delta) => format_duration(delta),
        Err(_) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{ParseError, SolverError};

    fn answered(part: u8, answer: &str) -> SolverResult {
        SolverResult {
            year: 2020,
            day: 23,
            part,
            answer: Ok(answer.to_string()),
            parse_duration: Some(TimeDelta::microseconds(12)),
            solve_duration: TimeDelta::microseconds(80),
        }
    }

    fn failed(part: u8) -> SolverResult {
        SolverResult {
            year: 2020,
            day: 11,
            part,
            answer: Err(SolverError::ParseError(ParseError::MissingData(
                "no input".to_string(),
            ))),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-12)), "-12µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_micros(40)),
            "40µs"
        );
    }

    #[test]
    fn test_full_line() {
        assert_eq!(
            format_full(&answered(1, "67384529")),
            "2020/23 Part 1: 67384529 (parse: 12µs, solve: 80µs)"
        );
        assert_eq!(
            format_full(&failed(2)),
            "2020/11 Part 2: Error - Parse error: Missing data: no input"
        );
    }

    #[test]
    fn test_full_line_without_parse_time() {
        let mut result = answered(2, "149245887792");
        result.parse_duration = None;
        assert_eq!(format_full(&result), "2020/23 Part 2: 149245887792 (solve: 80µs)");
    }

    #[test]
    fn test_quiet_line() {
        assert_eq!(format_quiet(&answered(1, "67384529")), "67384529");
        assert!(format_quiet(&failed(1)).starts_with("Error: "));
    }

    #[test]
    fn test_summary_counts_only_successes() {
        let results = vec![answered(1, "a"), failed(1), answered(2, "b")];
        assert_eq!(
            Summary::of(&results),
            Summary {
                solved: 2,
                failed: 1,
                parse_time: TimeDelta::microseconds(24),
                solve_time: TimeDelta::microseconds(160),
            }
        );
    }
}
