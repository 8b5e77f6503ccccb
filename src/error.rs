//! Error types for the price_forecast crate

use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The regularizer was given zero observations
    #[error("empty input: at least one observation is required")]
    EmptyInput,

    /// The imputer was given a series with no known values
    #[error("cannot impute a series with no known values")]
    AllMissing,

    /// Split index out of the open interval (0, series length)
    #[error("invalid split index {index} for a series of length {len}")]
    InvalidSplit { index: usize, len: usize },

    /// Actual and predicted sequences differ in length (or are empty)
    #[error("mismatched lengths: actual has {actual} values, predicted has {predicted}")]
    MismatchedLength { actual: usize, predicted: usize },

    /// A smoothing window or lag is larger than the available series
    #[error("window of size {window} exceeds series length {len}")]
    InsufficientWarmup { window: usize, len: usize },

    /// A model needs more training points than were supplied
    #[error("insufficient data: needed {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Error from invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
