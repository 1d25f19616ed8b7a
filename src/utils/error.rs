//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding a chart
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported input file: {0} (only .bin charts are supported)")]
    UnsupportedInput(String),

    #[error("Too many unknown events ({count} > {limit}); is the record format correct?")]
    UnknownEventOverflow { count: usize, limit: usize },

    #[error("Invalid chart format '{0}' (expected 'new' or 'old')")]
    InvalidFormat(String),

    #[error("Failed to read chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
