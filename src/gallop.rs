//! Adaptive run counter.
//!
//! Measures each run of a sorted sequence with a galloping search: the probe
//! step doubles while probes stay inside the run, and once a probe overshoots,
//! the step halves to pin the boundary between the last in-run index (`left`)
//! and the first known out-of-run index (`right`). A run of length `L` costs
//! `O(log L)` probes, so inputs dominated by long runs are classified in far
//! fewer than `n` comparisons.
//!
//! Three conditions abort the search with a [`CountError`]:
//! - the indices leave `start <= left <= test <= right` order
//! - an index is probed twice while measuring the same run
//! - the operation count exceeds `len + ITERATION_TOLERANCE`
//!
//! None of these can be reached by correct search logic, sorted or not; they
//! exist so that a regression fails loudly instead of degrading to a scan.

use crate::counts::{Accumulate, Counts, Tally};
use crate::error::{CountError, Result};
use ahash::AHashSet as HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// Slack allowed above the sequence length before the search is abandoned.
pub const ITERATION_TOLERANCE: usize = 10;

/// Receives the probes made by the adaptive counter.
///
/// Used to instrument the search; `()` ignores everything.
pub trait ProbeObserver {
    /// Called once per probe of `test` while measuring the run starting at `run_start`.
    fn probe(&mut self, _run_start: usize, _test: usize) {}

    /// Called when the run `[start, end]` (inclusive) has been counted.
    fn run_closed(&mut self, _start: usize, _end: usize) {}
}

impl ProbeObserver for () {}

/// Records every probe and closed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeLog {
    /// `(run_start, test)` in probe order
    pub probes: Vec<(usize, usize)>,
    /// `(start, end)` of each counted run, inclusive
    pub runs: Vec<(usize, usize)>,
}

impl ProbeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probed indices for the run starting at `run_start`.
    pub fn probes_for(&self, run_start: usize) -> Vec<usize> {
        self.probes
            .iter()
            .filter(|(start, _)| *start == run_start)
            .map(|(_, test)| *test)
            .collect()
    }
}

impl ProbeObserver for ProbeLog {
    fn probe(&mut self, run_start: usize, test: usize) {
        self.probes.push((run_start, test));
    }

    fn run_closed(&mut self, start: usize, end: usize) {
        self.runs.push((start, end));
    }
}

/// Indices for measuring the run that begins at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchState {
    /// First index of the run
    start: usize,
    /// Furthest index known to be inside the run
    left: usize,
    /// Index being compared against `start`
    test: usize,
    /// Furthest index reached by the current sweep
    right: usize,
    /// Current probe step, always >= 1
    jump: usize,
}

impl SearchState {
    fn at(start: usize) -> Self {
        Self {
            start,
            left: start,
            test: start + 1,
            right: start + 1,
            jump: 1,
        }
    }

    fn check<T: Debug>(&self, data: &[T]) -> Result<()> {
        if self.start <= self.left && self.left <= self.test && self.test <= self.right {
            return Ok(());
        }
        Err(CountError::InvariantViolation {
            value: format!("{:?}", data[self.start]),
            start: self.start,
            left: self.left,
            test: self.test,
            right: self.right,
        })
    }
}

fn check_budget(operations: usize, length: usize) -> Result<()> {
    if operations > length + ITERATION_TOLERANCE {
        return Err(CountError::IterationCap {
            operations,
            length,
            tolerance: ITERATION_TOLERANCE,
        });
    }
    Ok(())
}

/// Counts runs of sorted `data` into a fresh mapping.
///
/// # Errors
///
/// Returns an error only if the search logic breaks one of its own guards.
pub fn count_adaptive<T: Hash + Eq + Clone + Debug>(data: &[T]) -> Result<Tally<T>> {
    let mut counts = Counts::new();
    let operations = count_adaptive_into(&mut counts, data, Accumulate::Fresh)?;
    Ok(Tally { counts, operations })
}

/// Counts runs of sorted `data` into `counts`, returning the number of operations.
pub fn count_adaptive_into<T: Hash + Eq + Clone + Debug>(
    counts: &mut Counts<T>,
    data: &[T],
    mode: Accumulate,
) -> Result<usize> {
    count_adaptive_observed(counts, data, mode, &mut ())
}

/// Like [`count_adaptive_into`], reporting every probe to `observer`.
///
/// `data` must be non-decreasing. Unsorted input is not detected: the counts
/// still sum to `data.len()` but split values that occur in several runs.
pub fn count_adaptive_observed<T, O>(
    counts: &mut Counts<T>,
    data: &[T],
    mode: Accumulate,
    observer: &mut O,
) -> Result<usize>
where
    T: Hash + Eq + Clone + Debug,
    O: ProbeObserver + ?Sized,
{
    counts.prepare(mode);

    let length = data.len();
    if length == 0 {
        return Ok(0);
    }

    let mut state = SearchState::at(0);
    let mut seen = HashSet::new();
    let mut operations = 0;

    while state.test < length {
        state.check(data)?;

        if !seen.insert(state.test) {
            return Err(CountError::Reprobe {
                value: format!("{:?}", data[state.start]),
                index: state.test,
            });
        }

        operations += 1;
        check_budget(operations, length)?;
        observer.probe(state.start, state.test);

        let test = state.test;
        if data[test] == data[state.start] {
            if test == length - 1 || data[test + 1] != data[test] {
                close_run(counts, data, state.start, test, observer);
                state = SearchState::at(test + 1);
                seen.clear();
            } else if test == state.right {
                // Still galloping: double the step.
                state.left = test;
                state.jump *= 2;
                if test + state.jump >= length {
                    state.test = length - 1;
                    state.right = state.test;
                    state.jump = state.test - state.left;
                    trace!(
                        "forward to end: {:?}, start {}, left {}, test {}, jump {}, right {}",
                        data[state.start],
                        state.start,
                        state.left,
                        state.test,
                        state.jump,
                        state.right
                    );
                } else {
                    state.test += state.jump;
                    state.right = state.test;
                    trace!(
                        "forward: {:?}, start {}, left {}, test {}, jump {}, right {}",
                        data[state.start],
                        state.start,
                        state.left,
                        state.test,
                        state.jump,
                        state.right
                    );
                }
            } else {
                // Corrected back into the run: halve the gap towards `right`.
                state.left = test;
                state.jump = ((state.right - test) / 2).max(1);
                state.test += state.jump;
                trace!(
                    "forward correction: {:?}, start {}, left {}, test {}, jump {}, right {}",
                    data[state.start],
                    state.start,
                    state.left,
                    state.test,
                    state.jump,
                    state.right
                );
            }
        } else {
            state.right = test;
            if test - state.left == 1 {
                // `left` is in the run and `right` is not.
                close_run(counts, data, state.start, state.left, observer);
                state = SearchState::at(test);
                seen.clear();
            } else {
                state.jump = ((test - state.left) / 2).max(1);
                state.test -= state.jump;
                trace!(
                    "backward: {:?}, start {}, left {}, test {}, jump {}, right {}",
                    data[state.start],
                    state.start,
                    state.left,
                    state.test,
                    state.jump,
                    state.right
                );
            }
        }
    }

    // The loop exits with one element left when the previous run ended at `length - 2`.
    if state.start < length {
        operations += 1;
        check_budget(operations, length)?;
        close_run(counts, data, state.start, length - 1, observer);
    }

    debug!(operations, length, "adaptive count finished");
    Ok(operations)
}

fn close_run<T, O>(counts: &mut Counts<T>, data: &[T], start: usize, end: usize, observer: &mut O)
where
    T: Hash + Eq + Clone + Debug,
    O: ProbeObserver + ?Sized,
{
    let count = end - start + 1;
    debug!("found end-point: {:?}, count {}", data[start], count);
    counts.add(data[start].clone(), count);
    observer.run_closed(start, end);
}
