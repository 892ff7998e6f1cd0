//! Reorders results that arrive from worker threads in completion order
//!
//! Results are held back until every result that sorts before them has been
//! emitted, so output streams in year/day/part order while later days are
//! still running.

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, VecDeque};

/// Sort key of a result
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

impl ResultKey {
    /// One key per part of each work item
    pub fn expected_from(work_items: &[WorkItem]) -> Vec<ResultKey> {
        work_items
            .iter()
            .flat_map(|w| {
                w.parts.clone().map(move |part| ResultKey {
                    year: w.year,
                    day: w.day,
                    part,
                })
            })
            .collect()
    }
}

/// Buffers out-of-order results and releases them in key order
pub struct ResultAggregator {
    /// Keys not yet emitted, smallest first
    expected: VecDeque<ResultKey>,
    /// Received results waiting on an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        Self {
            expected: expected_keys.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return the results now ready, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front() {
            match self.pending.remove(next) {
                Some(result) => {
                    self.expected.pop_front();
                    ready.push(result);
                }
                None => break,
            }
        }
        ready
    }

    /// Whatever is still buffered, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Check if all expected results have been emitted
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
