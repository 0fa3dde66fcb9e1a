//! Baseline counter: one increment per element.
//!
//! This is the ground truth the adaptive counter is checked against.

use crate::counts::{Accumulate, Counts, Tally};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::info;

/// Counts every element of `data` into a fresh mapping.
///
/// The operation count is always `data.len()`.
pub fn count_linear<T: Hash + Eq + Clone>(data: &[T]) -> Tally<T> {
    let mut counts = Counts::new();
    let operations = count_linear_into(&mut counts, data, Accumulate::Fresh);
    Tally { counts, operations }
}

/// Counts every element of `data` into `counts`, returning `data.len()`.
pub fn count_linear_into<T: Hash + Eq + Clone>(
    counts: &mut Counts<T>,
    data: &[T],
    mode: Accumulate,
) -> usize {
    counts.prepare(mode);
    for value in data {
        counts.add(value.clone(), 1);
    }
    data.len()
}

/// Logs the mapping as a value-ordered `Element\tCount` table.
pub fn log_listing<T: Hash + Eq + Ord + Debug>(counts: &Counts<T>) {
    info!("Element\tCount");
    for (value, count) in counts.sorted() {
        info!("{:?}\t{}", value, count);
    }
}
