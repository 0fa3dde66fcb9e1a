use clap::{Parser, Subcommand};
use runcount::Distribution;

#[derive(Parser)]
#[command(
    name = "runcount",
    about = "Count value frequencies in sorted data with a galloping search",
    version
)]
pub struct Cli {
    /// Log level {trace|debug|info|warn|error}
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Seed for the random data source
    #[arg(long, global = true, default_value_t = 1)]
    pub seed: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check both counters agree on random sorted samples
    Verify {
        /// Number of samples to check
        #[arg(short, long, default_value_t = 1000)]
        repeats: usize,

        /// Distribution of the samples {uniform|normal}
        #[arg(short, long, default_value = "uniform")]
        distribution: Distribution,
    },

    /// Time both counters over growing sample sizes
    Sweep {
        /// Distribution of the samples {uniform|normal}
        #[arg(short, long, default_value = "normal")]
        distribution: Distribution,

        /// First sample size
        #[arg(long, default_value_t = 10_000)]
        start: usize,

        /// Largest sample size
        #[arg(long, default_value_t = 10_000_000)]
        max_elements: usize,

        /// Timed calls per sample size
        #[arg(short, long, default_value_t = 3)]
        repeats: usize,
    },

    /// Fit operations = p1 * ln(n) + p2 for the adaptive counter
    Fit {
        /// Number of random samples
        #[arg(short, long, default_value_t = 100)]
        samples: usize,

        /// Largest sample size
        #[arg(long, default_value_t = 1_000_000)]
        max_elements: usize,

        /// Distribution of the samples {uniform|normal}
        #[arg(short, long, default_value = "uniform")]
        distribution: Distribution,
    },

    /// Count the characters of TEXT after sorting them
    Count {
        text: String,
    },
}
