//! Growth-rate measurements for the two counters.
//!
//! Wall-clock sweeps over increasing sample sizes, plus least-squares fits of
//! the results against linear and logarithmic models.

use crate::counts::{Accumulate, Counts};
use crate::data_gen::Distribution;
use crate::error::{CountError, Result};
use crate::gallop::count_adaptive_into;
use crate::linear::count_linear_into;
use rand::Rng;
use std::fmt;
use std::time::Instant;
use tracing::info;

const ONE_MILLION: f64 = 1e6;

/// Which counter to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Linear,
    Adaptive,
}

impl Counter {
    /// Label used in reports.
    pub fn title(self) -> &'static str {
        match self {
            Counter::Linear => "O(n)",
            Counter::Adaptive => "Sub O(n)",
        }
    }

    /// Counts `data` into `counts` from scratch, returning the operation count.
    pub fn run(self, counts: &mut Counts<char>, data: &[char]) -> Result<usize> {
        match self {
            Counter::Linear => Ok(count_linear_into(counts, data, Accumulate::Fresh)),
            Counter::Adaptive => count_adaptive_into(counts, data, Accumulate::Fresh),
        }
    }
}

/// Average cost of one counting call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub average_secs: f64,
    /// Operation count of the last repeat
    pub operations: usize,
}

/// Times `repeats` calls of `counter` over `data`.
pub fn time_counter(counter: Counter, data: &[char], repeats: usize) -> Result<Timing> {
    if repeats == 0 {
        return Err(CountError::InvalidConfig("repeats must be positive".into()));
    }

    let mut counts = Counts::with_capacity(32);
    let mut operations = 0;
    let started = Instant::now();
    for _ in 0..repeats {
        operations = counter.run(&mut counts, data)?;
    }
    let elapsed = started.elapsed().as_secs_f64();

    let total = counts.total();
    if total != data.len() {
        return Err(CountError::Conservation {
            total,
            length: data.len(),
        });
    }

    Ok(Timing {
        average_secs: elapsed / repeats as f64,
        operations,
    })
}

/// Parameters for [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Sample size of the first point
    pub start: usize,
    /// Largest sample size measured
    pub max: usize,
    /// Growth factor between points
    pub factor: usize,
    pub repeats: usize,
    pub distribution: Distribution,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: 10_000,
            max: 10_000_000,
            factor: 10,
            repeats: 3,
            distribution: Distribution::Normal,
        }
    }
}

/// One measured sample size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub elements: usize,
    /// Time spent generating and sorting the sample
    pub setup_secs: f64,
    pub average_secs: f64,
    pub operations: usize,
}

/// Times `counter` on samples of size `start`, `start * factor`, ... up to `max`.
pub fn sweep<R: Rng>(rng: &mut R, counter: Counter, config: &SweepConfig) -> Result<Vec<SweepPoint>> {
    if config.start == 0 || config.factor < 2 || config.start > config.max {
        return Err(CountError::InvalidConfig(format!(
            "sweep from {} to {} by {} never terminates or is empty",
            config.start, config.max, config.factor
        )));
    }

    info!("{}", "*".repeat(80));
    info!("---- {} ----", counter.title());
    info!("Elements (m)\tRepeats\tSetup (sec)\tAverage (sec)\tOperations");

    let mut points = Vec::new();
    let mut elements = config.start;
    while elements <= config.max {
        let setup_started = Instant::now();
        let data = config.distribution.generate_sorted(rng, elements)?;
        let setup_secs = setup_started.elapsed().as_secs_f64();

        let timing = time_counter(counter, &data, config.repeats)?;
        info!(
            "{:.2}\t\t{}\t{:.4}\t\t{:.6}\t{}",
            elements as f64 / ONE_MILLION,
            config.repeats,
            setup_secs,
            timing.average_secs,
            timing.operations
        );
        points.push(SweepPoint {
            elements,
            setup_secs,
            average_secs: timing.average_secs,
            operations: timing.operations,
        });

        elements = match elements.checked_mul(config.factor) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(points)
}

/// Least-squares fit `y = slope * f(x) + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, 1.0 for a perfect fit
    pub r_squared: f64,
}

impl Fit {
    pub fn predict_linear(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn predict_log(&self, x: f64) -> f64 {
        self.slope * x.ln() + self.intercept
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3} x + {:.3} (r² {:.3})",
            self.slope, self.intercept, self.r_squared
        )
    }
}

/// Ordinary least squares of `ys` against `xs`.
pub fn fit_linear(xs: &[f64], ys: &[f64]) -> Result<Fit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(CountError::InvalidConfig(format!(
            "need at least two paired points, got {} x and {} y",
            xs.len(),
            ys.len()
        )));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
        syy += (y - mean_y) * (y - mean_y);
    }
    if sxx == 0.0 {
        return Err(CountError::InvalidConfig("all x values are equal".into()));
    }

    let slope = sxy / sxx;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };
    Ok(Fit {
        slope,
        intercept: mean_y - slope * mean_x,
        r_squared,
    })
}

/// Least squares of `ys` against `ln(xs)`: `y = p1 * ln(x) + p2`.
pub fn fit_log(xs: &[f64], ys: &[f64]) -> Result<Fit> {
    if xs.iter().any(|&x| x <= 0.0) {
        return Err(CountError::InvalidConfig(
            "logarithmic model needs positive x".into(),
        ));
    }
    let logs: Vec<f64> = xs.iter().map(|x| x.ln()).collect();
    fit_linear(&logs, ys)
}

/// Runs the adaptive counter on `samples` random sequences with lengths in
/// `[min_len, max_len]`, returning `(elements, operations)` pairs.
pub fn sample_operations<R: Rng>(
    rng: &mut R,
    samples: usize,
    min_len: usize,
    max_len: usize,
    distribution: Distribution,
) -> Result<Vec<(usize, usize)>> {
    if min_len == 0 || min_len > max_len {
        return Err(CountError::InvalidConfig(format!(
            "length range {}..={} is empty or includes zero",
            min_len, max_len
        )));
    }

    let mut counts = Counts::with_capacity(32);
    let mut pairs = Vec::with_capacity(samples);
    for _ in 0..samples {
        let n = rng.random_range(min_len..=max_len);
        let data = distribution.generate_sorted(rng, n)?;
        let operations = count_adaptive_into(&mut counts, &data, Accumulate::Fresh)?;
        pairs.push((n, operations));
    }
    Ok(pairs)
}

/// Fits the logarithmic model to `(elements, operations)` pairs.
pub fn fit_operations(pairs: &[(usize, usize)]) -> Result<Fit> {
    let xs: Vec<f64> = pairs.iter().map(|&(n, _)| n as f64).collect();
    let ys: Vec<f64> = pairs.iter().map(|&(_, ops)| ops as f64).collect();
    fit_log(&xs, &ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fit_linear_exact() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [3.0, 5.0, 7.0, 9.0];
        let fit = fit_linear(&xs, &ys).unwrap();
        assert!(close(fit.slope, 2.0));
        assert!(close(fit.intercept, 1.0));
        assert!(close(fit.r_squared, 1.0));
        assert!(close(fit.predict_linear(10.0), 21.0));
    }

    #[test]
    fn test_fit_log_exact() {
        let xs = [1.0, 10.0, 100.0, 1000.0];
        let ys: Vec<f64> = xs.iter().map(|x: &f64| 4.0 * x.ln() + 2.0).collect();
        let fit = fit_log(&xs, &ys).unwrap();
        assert!(close(fit.slope, 4.0));
        assert!(close(fit.intercept, 2.0));
        assert!((fit.predict_log(50.0) - (4.0 * 50f64.ln() + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_degenerate_input() {
        assert!(fit_linear(&[1.0], &[1.0]).is_err());
        assert!(fit_linear(&[1.0, 2.0], &[1.0]).is_err());
        assert!(fit_linear(&[2.0, 2.0], &[1.0, 3.0]).is_err());
        assert!(fit_log(&[0.0, 2.0], &[1.0, 3.0]).is_err());
    }

    #[test]
    fn test_time_counter_conserves() {
        let data: Vec<char> = "aaaaabbccc".chars().collect();
        let linear = time_counter(Counter::Linear, &data, 3).unwrap();
        let adaptive = time_counter(Counter::Adaptive, &data, 3).unwrap();
        assert_eq!(linear.operations, 10);
        assert_eq!(adaptive.operations, 8);
        assert!(time_counter(Counter::Linear, &data, 0).is_err());
    }

    #[test]
    fn test_small_sweep() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SweepConfig {
            start: 100,
            max: 10_000,
            factor: 10,
            repeats: 1,
            distribution: Distribution::Normal,
        };
        let points = sweep(&mut rng, Counter::Adaptive, &config).unwrap();
        let sizes: Vec<usize> = points.iter().map(|p| p.elements).collect();
        assert_eq!(sizes, vec![100, 1_000, 10_000]);
        assert!(points.iter().all(|p| p.operations < p.elements));
    }

    #[test]
    fn test_sweep_rejects_bad_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SweepConfig {
            factor: 1,
            ..SweepConfig::default()
        };
        assert!(sweep(&mut rng, Counter::Linear, &config).is_err());
    }

    #[test]
    fn test_operations_grow_slowly() {
        let mut rng = StdRng::seed_from_u64(1);
        let pairs = sample_operations(&mut rng, 40, 1_000, 50_000, Distribution::Uniform).unwrap();
        assert_eq!(pairs.len(), 40);
        assert!(pairs.iter().all(|&(n, ops)| ops < n / 2));
        let fit = fit_operations(&pairs).unwrap();
        assert!(fit.slope.is_finite());
    }
}
