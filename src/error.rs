use thiserror::Error;

/// Errors raised while counting, verifying, or generating sample data.
///
/// The first three variants are programming-error signals from the adaptive
/// counter. They are deterministic: retrying the same input reproduces them.
/// Values are rendered with `Debug` so the error type stays non-generic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    /// Search indices fell out of `start <= left <= test <= right` order.
    #[error(
        "index ordering broken for run of {value}: start {start}, left {left}, test {test}, right {right}"
    )]
    InvariantViolation {
        value: String,
        start: usize,
        left: usize,
        test: usize,
        right: usize,
    },

    /// The same index was probed twice while measuring one run.
    #[error("index {index} probed more than once for run of {value}")]
    Reprobe { value: String, index: usize },

    /// The search needed more operations than the sequence has elements plus slack.
    #[error(
        "fail fast: {operations} operations exceeds length {length} + tolerance {tolerance}"
    )]
    IterationCap {
        operations: usize,
        length: usize,
        tolerance: usize,
    },

    /// The two counters disagree on a value.
    #[error("counts wrong for {value}: expected {expected}, got {actual}")]
    Mismatch {
        value: String,
        expected: usize,
        actual: usize,
    },

    /// Counts after a timed run do not add up to the sequence length.
    #[error("counts sum to {total}, expected {length}")]
    Conservation { total: usize, length: usize },

    /// Distribution name not recognised by the data source.
    #[error("unknown distribution {0:?}")]
    UnknownDistribution(String),

    /// Requested sample length is not usable.
    #[error("invalid sample length {0}")]
    InvalidLength(usize),

    /// Sweep or fit parameters are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for counting operations.
pub type Result<T> = std::result::Result<T, CountError>;
