//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use pricewatch_domain::LabelSpec;
use pricewatch_ingest::IngestConfig;
use pricewatch_search::SearchConfig;
use pricewatch_staleness::StalenessConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration was loaded from
    #[serde(skip)]
    source: Option<PathBuf>,
}

/// Analysis profile: which columns to read and how strict to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Column identifying the material
    pub entity_column: String,

    /// Column holding the effective date
    pub date_column: String,

    /// Staleness threshold in days
    pub threshold_days: u32,

    /// Column appended to labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_column: Option<String>,

    /// Column holding the price for history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,

    /// Default search columns; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_columns: Vec<String>,

    /// Default history window in days
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Reject spreadsheets with more data rows than this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".pricewatch").join("config.toml"))
    }

    /// Load configuration from `path` (or the default path), falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.source = Some(path);
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            source: None,
        }
    }
}

impl Profile {
    /// Profile with the columns and threshold of a staleness preset.
    pub fn from_staleness(config: StalenessConfig) -> Self {
        Self {
            entity_column: config.entity_column,
            date_column: config.date_column,
            threshold_days: config.threshold_days,
            code_column: config.code_column,
            value_column: None,
            search_columns: Vec::new(),
            history_days: default_history_days(),
            max_rows: None,
        }
    }

    /// Staleness settings of this profile.
    pub fn staleness_config(&self) -> StalenessConfig {
        StalenessConfig {
            entity_column: self.entity_column.clone(),
            date_column: self.date_column.clone(),
            threshold_days: self.threshold_days,
            code_column: self.code_column.clone(),
        }
    }

    /// Search settings of this profile.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::default().with_columns(self.search_columns.iter().cloned())
    }

    /// Ingest settings of this profile.
    pub fn ingest_config(&self) -> IngestConfig {
        match self.max_rows {
            Some(max_rows) => IngestConfig::default().with_max_rows(max_rows),
            None => IngestConfig::default(),
        }
    }

    /// Display labels of this profile.
    pub fn labels(&self) -> LabelSpec {
        let labels = LabelSpec::new(self.entity_column.clone());
        match &self.code_column {
            Some(code) => labels.with_code(code.clone()),
            None => labels,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::from_staleness(StalenessConfig::default())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_history_days() -> u32 {
    30
}
