//! Search engine configuration

use serde::{Deserialize, Serialize};

/// Which columns a query is matched against
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnSelection {
    /// Every column of the record set
    #[default]
    All,
    /// Only the named columns; names absent from the set are skipped
    Only(Vec<String>),
}

impl ColumnSelection {
    /// Build a selection from column names; no names means all columns
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            ColumnSelection::All
        } else {
            ColumnSelection::Only(names)
        }
    }
}

/// Configuration for the search engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default columns to search; empty means all columns
    #[serde(default)]
    pub columns: Vec<String>,

    /// Keep at most this many matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SearchConfig {
    /// Search only the given columns by default
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Cap the number of returned matches
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Default column selection
    pub fn selection(&self) -> ColumnSelection {
        ColumnSelection::from_names(self.columns.iter().cloned())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == Some(0) {
            return Err("limit must be greater than 0".to_string());
        }
        if self.columns.iter().any(|c| c.is_empty()) {
            return Err("column names must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
