//! Error types for steady-state detection
//!
//! Configuration problems are reported once, before any sample is processed;
//! the per-sample loop itself never fails on finite input.

use thiserror::Error;

/// Error type for detector configuration and input problems
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to the detector
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Input series contains a NaN or infinite value
    #[error("Non-finite sample at index {index}: {value}")]
    NonFiniteSample { index: usize, value: f64 },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }
}
