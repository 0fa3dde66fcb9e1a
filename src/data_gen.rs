//! Random lowercase-letter samples for exercising the counters.

use crate::error::{CountError, Result};
use rand::Rng;
use rand_distr::Normal;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const CODE_A: u32 = 'a' as u32;
const CODE_Z: u32 = 'z' as u32;
const NORMAL_MEAN: f64 = ((CODE_A + CODE_Z) / 2) as f64;
const NORMAL_STD: f64 = 10.0;

/// Shape of the generated letter distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Every letter from `'a'` to `'z'` equally likely.
    #[default]
    Uniform,
    /// Letter codes drawn from a normal distribution centred on `'m'`.
    ///
    /// Runs near the centre are long, which is where the adaptive counter wins.
    Normal,
}

impl Distribution {
    /// Draws `n` letters, unsorted.
    pub fn generate<R: Rng>(self, rng: &mut R, n: usize) -> Result<Vec<char>> {
        if n == 0 {
            return Err(CountError::InvalidLength(n));
        }
        let data = match self {
            Distribution::Uniform => (0..n)
                .map(|_| letter(rng.random_range(CODE_A..=CODE_Z)))
                .collect(),
            Distribution::Normal => {
                let normal = Normal::new(NORMAL_MEAN, NORMAL_STD)
                    .map_err(|e| CountError::InvalidConfig(e.to_string()))?;
                (0..n)
                    .map(|_| {
                        let code: f64 = rng.sample(normal);
                        // Keep outliers printable.
                        letter(code.round().clamp(33.0, 126.0) as u32)
                    })
                    .collect()
            }
        };
        Ok(data)
    }

    /// Draws `n` letters and sorts them.
    pub fn generate_sorted<R: Rng>(self, rng: &mut R, n: usize) -> Result<Vec<char>> {
        let mut data = self.generate(rng, n)?;
        data.sort_unstable();
        debug!(distribution = %self, n, "generated sorted sample");
        Ok(data)
    }
}

fn letter(code: u32) -> char {
    char::from_u32(code).unwrap_or('?')
}

impl FromStr for Distribution {
    type Err = CountError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "uniform" => Ok(Distribution::Uniform),
            "normal" => Ok(Distribution::Normal),
            other => Err(CountError::UnknownDistribution(other.to_string())),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Uniform => f.write_str("uniform"),
            Distribution::Normal => f.write_str("normal"),
        }
    }
}
