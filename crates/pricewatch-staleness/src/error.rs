//! Error types for staleness analysis

use thiserror::Error;

/// A required column is absent from the record set
///
/// Rows whose date does not parse are not errors; they are skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The named column does not exist
    #[error("Missing column: '{0}'")]
    MissingColumn(String),
}

/// Errors that can occur while setting up an Analyzer
#[derive(Error, Debug)]
pub enum StalenessError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
