//! Equivalence check of the adaptive counter against the baseline.

use crate::counts::Counts;
use crate::data_gen::Distribution;
use crate::error::{CountError, Result};
use crate::gallop::count_adaptive;
use crate::linear::count_linear;
use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, info};

/// Parameters for [`verify_equivalence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Number of random sequences to check
    pub repeats: usize,
    /// Shortest sequence generated
    pub min_len: usize,
    /// Longest sequence generated
    pub max_len: usize,
    pub distribution: Distribution,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            repeats: 1000,
            min_len: 5,
            max_len: 1000,
            distribution: Distribution::Uniform,
        }
    }
}

/// Totals accumulated over a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifyReport {
    /// Sequences checked
    pub checks: usize,
    /// Elements across all sequences
    pub elements: usize,
    pub linear_operations: usize,
    pub adaptive_operations: usize,
}

/// Checks that `actual` holds exactly the counts in `expected`.
///
/// Keys missing on either side count as mismatches. When several values
/// disagree, the smallest one is reported.
pub fn compare_counts<T: Hash + Eq + Ord + Debug>(
    expected: &Counts<T>,
    actual: &Counts<T>,
) -> Result<()> {
    let mismatch = expected
        .iter()
        .chain(actual.iter())
        .filter(|(value, _)| expected.get(value) != actual.get(value))
        .map(|(value, _)| value)
        .min();

    match mismatch {
        Some(value) => Err(CountError::Mismatch {
            value: format!("{:?}", value),
            expected: expected.get(value),
            actual: actual.get(value),
        }),
        None => Ok(()),
    }
}

/// Runs both counters on `data` and checks they agree.
pub fn verify_sequence<T: Hash + Eq + Ord + Clone + Debug>(data: &[T]) -> Result<(usize, usize)> {
    let linear = count_linear(data);
    let adaptive = count_adaptive(data)?;
    compare_counts(&linear.counts, &adaptive.counts)?;
    Ok((linear.operations, adaptive.operations))
}

/// Generates `config.repeats` random sorted sequences and checks both counters
/// agree on every one of them.
///
/// # Errors
///
/// Fails on the first mismatch, or if the adaptive counter trips one of its guards.
pub fn verify_equivalence<R: Rng>(rng: &mut R, config: &VerifyConfig) -> Result<VerifyReport> {
    if config.min_len == 0 || config.min_len > config.max_len {
        return Err(CountError::InvalidConfig(format!(
            "length range {}..={} is empty or includes zero",
            config.min_len, config.max_len
        )));
    }

    let mut report = VerifyReport::default();
    for _ in 0..config.repeats {
        let n = rng.random_range(config.min_len..=config.max_len);
        let data = config.distribution.generate_sorted(rng, n)?;
        let (linear, adaptive) = verify_sequence(&data)?;

        report.checks += 1;
        report.elements += n;
        report.linear_operations += linear;
        report.adaptive_operations += adaptive;
    }

    debug!(?report, "verification totals");
    info!("Both implementations result in the exact same counts");
    Ok(report)
}
