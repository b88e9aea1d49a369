//! Error types for the Ingestor

use thiserror::Error;

/// Errors that abort an ingest
///
/// Per-cell coercion problems are never errors; they keep the cell's raw text.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The bytes are not a readable workbook container
    #[error("Unreadable workbook: {0}")]
    Workbook(String),

    /// The input format could not be recognised
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The requested sheet does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The CSV stream is malformed (e.g. invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(String),

    /// The input exceeds the configured byte cap
    #[error("Input too large: {actual} bytes (max: {limit})")]
    TooManyBytes {
        /// Configured cap
        limit: usize,
        /// Input size
        actual: usize,
    },

    /// The input exceeds the configured row cap
    #[error("Too many rows: more than {limit} data rows")]
    TooManyRows {
        /// Configured cap
        limit: usize,
    },

    /// Invalid ingest configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading the input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for IngestError {
    fn from(e: calamine::Error) -> Self {
        IngestError::Workbook(e.to_string())
    }
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::Csv(e.to_string())
    }
}
