//! Configuration for the Ingestor

use serde::{Deserialize, Serialize};

/// How to interpret the input bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Sniff the container: ZIP or OLE magic means a workbook, anything else is rejected
    #[default]
    Auto,
    /// Spreadsheet workbook (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
    /// Delimited UTF-8 text
    Csv,
}

/// Which worksheet of a workbook to read
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetSelector {
    /// The first sheet in workbook order
    #[default]
    First,
    /// A sheet by exact name
    Named(String),
}

/// Configuration for the Ingestor
///
/// Size caps are left to the caller; none are applied by default.
///
/// # Examples
///
/// ```
/// use pricewatch_ingest::IngestConfig;
///
/// let config = IngestConfig::default();
/// assert!(config.max_rows.is_none());
///
/// let config = IngestConfig::bounded();
/// assert_eq!(config.max_rows, Some(200_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Input format
    #[serde(default)]
    pub format: InputFormat,

    /// Reject inputs larger than this many bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,

    /// Reject inputs with more than this many data rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,

    /// Field delimiter for CSV input
    #[serde(default = "default_delimiter")]
    pub csv_delimiter: char,

    /// Worksheet to read
    #[serde(default)]
    pub sheet: SheetSelector,
}

fn default_delimiter() -> char {
    ','
}

impl Default for IngestConfig {
    /// Auto-detected workbook, first sheet, no size caps
    fn default() -> Self {
        Self {
            format: InputFormat::Auto,
            max_bytes: None,
            max_rows: None,
            csv_delimiter: default_delimiter(),
            sheet: SheetSelector::First,
        }
    }
}

impl IngestConfig {
    /// Bounded preset for interactive use: 50 MiB and 200,000 rows
    pub fn bounded() -> Self {
        Self {
            max_bytes: Some(50 * 1024 * 1024),
            max_rows: Some(200_000),
            ..Self::default()
        }
    }

    /// CSV preset with the given delimiter
    pub fn csv(delimiter: char) -> Self {
        Self {
            format: InputFormat::Csv,
            csv_delimiter: delimiter,
            ..Self::default()
        }
    }

    /// Set the row cap
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Set the byte cap
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Read a specific sheet
    pub fn with_sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet = SheetSelector::Named(name.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.csv_delimiter.is_ascii() {
            return Err("csv_delimiter must be a single ASCII character".to_string());
        }
        if self.max_rows == Some(0) {
            return Err("max_rows must be greater than 0".to_string());
        }
        if self.max_bytes == Some(0) {
            return Err("max_bytes must be greater than 0".to_string());
        }
        if let SheetSelector::Named(name) = &self.sheet {
            if name.is_empty() {
                return Err("sheet name must not be empty".to_string());
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.format, InputFormat::Auto);
        assert_eq!(config.sheet, SheetSelector::First);
    }

    #[test]
    fn test_bounded_config_is_valid() {
        let config = IngestConfig::bounded();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_bytes, Some(50 * 1024 * 1024));
    }

    #[test]
    fn test_invalid_delimiter() {
        let config = IngestConfig::csv('→');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_caps_rejected() {
        assert!(IngestConfig::default().with_max_rows(0).validate().is_err());
        assert!(IngestConfig::default().with_max_bytes(0).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IngestConfig::csv(';').with_max_rows(10).with_sheet("Prices");
        let toml_str = config.to_toml().unwrap();
        let parsed = IngestConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_defaults() {
        let parsed = IngestConfig::from_toml("max_rows = 5").unwrap();
        assert_eq!(parsed.max_rows, Some(5));
        assert_eq!(parsed.format, InputFormat::Auto);
        assert_eq!(parsed.csv_delimiter, ',');
    }
}
