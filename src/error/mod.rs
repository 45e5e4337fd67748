//! Error handling for the sales dashboard.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for loading, filtering and rendering the dashboard
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error raised by an Arrow kernel or the CSV reader
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error decoding a Parquet input file
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading a config file or writing the summary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source file does not exist
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A column the dashboard depends on is absent
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// A column exists but holds an unexpected Arrow type
    #[error("Column '{column}' is not a {expected} column")]
    ColumnType {
        /// Column name
        column: String,
        /// Human readable expected type
        expected: &'static str,
    },

    /// A value in the date column could not be parsed with any configured format
    #[error("Unparseable date '{value}' in row {row}")]
    DateParse {
        /// Zero-based row index in the source table
        row: usize,
        /// The raw cell contents
        value: String,
    },

    /// Chart drawing failed
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Create a render error from any drawing backend error
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
