//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form input rejected before any calculation
    #[error("{0}")]
    Validation(#[from] ValidationError),

}

/// Reasons a submitted form is rejected.
///
/// The messages are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field is empty or not a number (age must be a whole number)
    #[error("Fill all fields with numbers.")]
    NotNumeric,

    /// A field is zero or negative
    #[error("All numbers must be positive.")]
    NotPositive,

    /// Weight and height are numeric and positive but yield no finite BMI
    #[error("Weight and height are out of range.")]
    OutOfRange,
}
