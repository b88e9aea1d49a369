//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pricewatch - Find stale material prices in spreadsheet price lists.
#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "PRICEWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (labels only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every row of a spreadsheet
    Show(ShowArgs),

    /// Summary statistics of the numeric columns
    Describe(FileArgs),

    /// Find rows containing a search term
    Search(SearchArgs),

    /// List materials whose price has not been revised recently
    Stale(StaleArgs),

    /// Price history over the last N days
    History(HistoryArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Load a spreadsheet and explore it interactively
    Repl(FileArgs),
}

/// A spreadsheet argument.
#[derive(Debug, Parser)]
pub struct FileArgs {
    /// Workbook (xlsx, xls, ods) or CSV file
    pub file: PathBuf,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Workbook (xlsx, xls, ods) or CSV file
    pub file: PathBuf,

    /// Show at most this many rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Workbook (xlsx, xls, ods) or CSV file
    pub file: PathBuf,

    /// Search term (case-insensitive substring)
    #[arg(default_value = "")]
    pub query: String,

    /// Column to search (repeatable; default: profile columns, else all)
    #[arg(short = 'c', long = "column")]
    pub columns: Vec<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the stale command.
#[derive(Debug, Parser)]
pub struct StaleArgs {
    /// Workbook (xlsx, xls, ods) or CSV file
    pub file: PathBuf,

    /// Column identifying the material
    #[arg(long)]
    pub entity_column: Option<String>,

    /// Column holding the effective date
    #[arg(long)]
    pub date_column: Option<String>,

    /// Report prices older than this many days
    #[arg(short, long)]
    pub threshold_days: Option<u32>,

    /// Reference date (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,

    /// Only analyze rows matching this search term
    #[arg(short, long)]
    pub query: Option<String>,

    /// Column the search term is matched against (repeatable)
    #[arg(short = 'c', long = "column")]
    pub columns: Vec<String>,

    /// Only show this material ("all" shows every material)
    #[arg(long)]
    pub focus: Option<String>,

    /// Column appended to labels, e.g. a material code
    #[arg(long)]
    pub code_column: Option<String>,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Workbook (xlsx, xls, ods) or CSV file
    pub file: PathBuf,

    /// Column holding the observation date
    #[arg(long)]
    pub date_column: Option<String>,

    /// Column holding the price
    #[arg(long)]
    pub value_column: Option<String>,

    /// Window length in days
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Reference date (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,

    /// Only show this material ("all" shows every material)
    #[arg(long)]
    pub focus: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set(ProfileSetArgs),

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Arguments for `profile set`.
#[derive(Debug, Parser)]
pub struct ProfileSetArgs {
    /// Profile name
    pub name: String,

    /// Start from a threshold preset
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Column identifying the material
    #[arg(long)]
    pub entity_column: Option<String>,

    /// Column holding the effective date
    #[arg(long)]
    pub date_column: Option<String>,

    /// Staleness threshold in days
    #[arg(long)]
    pub threshold_days: Option<u32>,

    /// Column appended to labels
    #[arg(long)]
    pub code_column: Option<String>,

    /// Column holding the price for history
    #[arg(long)]
    pub value_column: Option<String>,

    /// Default search column (repeatable)
    #[arg(long = "search-column")]
    pub search_columns: Vec<String>,

    /// Default history window in days
    #[arg(long)]
    pub history_days: Option<u32>,

    /// Reject spreadsheets with more data rows than this
    #[arg(long)]
    pub max_rows: Option<usize>,
}

/// Threshold presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// 90 days
    Default,
    /// 30 days
    Strict,
    /// 180 days
    Lenient,
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for pricewatch_staleness::StalenessConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => pricewatch_staleness::StalenessConfig::default(),
            PresetArg::Strict => pricewatch_staleness::StalenessConfig::strict(),
            PresetArg::Lenient => pricewatch_staleness::StalenessConfig::lenient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_command() {
        let cli = Cli::parse_from([
            "pricewatch",
            "stale",
            "prices.xlsx",
            "--threshold-days",
            "30",
            "--as-of",
            "2024-06-01",
            "-q",
            "bolt",
            "-c",
            "자재명",
        ]);
        match cli.command {
            Command::Stale(args) => {
                assert_eq!(args.file, PathBuf::from("prices.xlsx"));
                assert_eq!(args.threshold_days, Some(30));
                assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 6, 1));
                assert_eq!(args.query.as_deref(), Some("bolt"));
                assert_eq!(args.columns, vec!["자재명"]);
            }
            _ => panic!("Expected Stale command"),
        }
    }

    #[test]
    fn test_search_query_defaults_to_empty() {
        let cli = Cli::parse_from(["pricewatch", "search", "prices.xlsx"]);
        match cli.command {
            Command::Search(args) => assert!(args.query.is_empty()),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["pricewatch", "describe", "prices.xlsx", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from(["pricewatch", "stale", "prices.xlsx", "--as-of", "06/01/2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_conversion() {
        let config: pricewatch_staleness::StalenessConfig = PresetArg::Strict.into();
        assert_eq!(config.threshold_days, 30);
    }
}
