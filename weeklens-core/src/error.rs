//! Error types for weeklens-core

use thiserror::Error;

/// Main error type for the weeklens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Week data does not describe the configured week
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Screen-time series violates its invariants
    #[error("screen time error: {0}")]
    ScreenTime(String),

    /// Remote assistant request or response failure
    #[error("assistant error: {0}")]
    Assistant(String),
}

/// Result type alias for weeklens-core
pub type Result<T> = std::result::Result<T, Error>;
