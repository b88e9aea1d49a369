//! Error types for the CLI application.

use pricewatch_ingest::IngestError;
use pricewatch_search::SearchError;
use pricewatch_staleness::{SchemaError, StalenessError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input file could not be ingested
    #[error("Could not read spreadsheet: {0}")]
    Ingest(#[from] IngestError),

    /// A required column is absent
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Invalid analysis settings
    #[error("{0}")]
    Staleness(#[from] StalenessError),

    /// Invalid search settings
    #[error("{0}")]
    Search(#[from] SearchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
