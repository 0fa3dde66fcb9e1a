//! # runcount - Run-Length Frequency Counting
//!
//! Counts how often each distinct value occurs in a sorted sequence.
//!
//! Two counters produce the same frequency mapping:
//! 1. **Linear**: one increment per element, always `n` operations
//! 2. **Adaptive**: galloping search for each run's end, `O(r log(n / r))`
//!    operations for `r` runs, and never more than `n + ITERATION_TOLERANCE`
//!
//! ## Example
//!
//! ```
//! use runcount::{count_adaptive, count_linear};
//!
//! let data: Vec<char> = "aaaaabbccc".chars().collect();
//!
//! let linear = count_linear(&data);
//! let adaptive = count_adaptive(&data).unwrap();
//!
//! assert_eq!(linear.counts, adaptive.counts);
//! assert_eq!(adaptive.counts.get(&'a'), 5);
//! assert!(adaptive.operations < linear.operations);
//! ```
//!
//! ## Performance
//!
//! - Input must already be sorted; nothing here sorts or validates order
//! - Each call owns its search state, so counters can run on many threads at once

mod complexity;
mod counts;
mod data_gen;
mod error;
mod gallop;
mod linear;
mod verify;

#[cfg(test)]
mod tests;

pub use complexity::{
    fit_linear, fit_log, fit_operations, sample_operations, sweep, time_counter, Counter, Fit,
    SweepConfig, SweepPoint, Timing,
};
pub use counts::{Accumulate, Counts, Tally};
pub use data_gen::Distribution;
pub use error::{CountError, Result};
pub use gallop::{
    count_adaptive, count_adaptive_into, count_adaptive_observed, ProbeLog, ProbeObserver,
    ITERATION_TOLERANCE,
};
pub use linear::{count_linear, count_linear_into, log_listing};
pub use verify::{compare_counts, verify_equivalence, verify_sequence, VerifyConfig, VerifyReport};
