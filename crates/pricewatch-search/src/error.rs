//! Search engine error types

use thiserror::Error;

/// Errors that can occur while setting up a search
///
/// Searching itself never fails: zero hits is an empty result.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
