//! Configuration for staleness analysis
//!
//! Names the entity and date columns and sets the age threshold.

use serde::{Deserialize, Serialize};

/// Configuration for the Analyzer
///
/// # Examples
///
/// ```
/// use pricewatch_staleness::StalenessConfig;
///
/// // Default: a price not revised for over 90 days is stale
/// let config = StalenessConfig::default();
/// assert_eq!(config.threshold_days, 90);
///
/// // Strict: 30 days
/// let config = StalenessConfig::strict();
/// assert_eq!(config.threshold_days, 30);
///
/// // Lenient: 180 days
/// let config = StalenessConfig::lenient();
/// assert_eq!(config.threshold_days, 180);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessConfig {
    /// Column identifying the material
    /// Default: 자재명
    #[serde(default = "default_entity_column")]
    pub entity_column: String,

    /// Column holding the date the price took effect
    /// Default: 효력시작일
    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Records strictly older than this many days are stale
    /// Default: 90
    #[serde(default = "default_threshold_days")]
    pub threshold_days: u32,

    /// Optional column shown next to the entity in labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_column: Option<String>,
}

fn default_entity_column() -> String {
    "자재명".to_string()
}

fn default_date_column() -> String {
    "효력시작일".to_string()
}

fn default_threshold_days() -> u32 {
    90
}

impl Default for StalenessConfig {
    /// Material-name and effective-date columns, 90-day threshold
    fn default() -> Self {
        Self {
            entity_column: default_entity_column(),
            date_column: default_date_column(),
            threshold_days: default_threshold_days(),
            code_column: None,
        }
    }
}

impl StalenessConfig {
    /// Strict configuration: 30-day threshold
    pub fn strict() -> Self {
        Self {
            threshold_days: 30,
            ..Self::default()
        }
    }

    /// Lenient configuration: 180-day threshold
    pub fn lenient() -> Self {
        Self {
            threshold_days: 180,
            ..Self::default()
        }
    }

    /// Use the given entity and date columns
    pub fn with_columns(mut self, entity_column: impl Into<String>, date_column: impl Into<String>) -> Self {
        self.entity_column = entity_column.into();
        self.date_column = date_column.into();
        self
    }

    /// Use the given threshold
    pub fn with_threshold(mut self, threshold_days: u32) -> Self {
        self.threshold_days = threshold_days;
        self
    }

    /// Show a code column next to the entity in labels
    pub fn with_code_column(mut self, code_column: impl Into<String>) -> Self {
        self.code_column = Some(code_column.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.entity_column.is_empty() {
            return Err("entity_column must not be empty".to_string());
        }
        if self.date_column.is_empty() {
            return Err("date_column must not be empty".to_string());
        }
        if self.code_column.as_deref() == Some("") {
            return Err("code_column must not be empty when set".to_string());
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
