//! Error types for the cleaning pipeline.
//!
//! Most steps report failures through `anyhow` with context attached. The
//! variants here cover the conditions a caller may want to match on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    /// File extension is neither CSV nor Parquet.
    #[error("Unsupported file format: '{extension}'. Supported formats: csv, parquet")]
    UnsupportedFormat { extension: String },

    /// A ratio threshold outside `0.0..=1.0`.
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A column the step cannot run without.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A column exists but holds a type the step cannot work with.
    #[error("Column '{column}' has type {found}, expected {expected}")]
    UnexpectedType {
        column: String,
        expected: &'static str,
        found: String,
    },
}
