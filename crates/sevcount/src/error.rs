//! Error types for the sevcount library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sevcount operations.
#[derive(Debug, Error)]
pub enum SevcountError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to tabulate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A named column is not present in the table.
    #[error("The column '{column}' is not present in the table")]
    MissingColumn { column: String },

    /// A column does not have one value per table row.
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A severity spec could not be parsed.
    #[error("Invalid severity spec: {0}")]
    InvalidSpec(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SevcountError {
    /// Shorthand for a missing-column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        SevcountError::MissingColumn {
            column: column.into(),
        }
    }
}

/// Result type alias for sevcount operations.
pub type Result<T> = std::result::Result<T, SevcountError>;
