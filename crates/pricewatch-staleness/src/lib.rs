//! Pricewatch Staleness
//!
//! Finds materials whose price has not been revised in over N days.
//!
//! # Overview
//!
//! The Analyzer is responsible for:
//! - **Date parsing**: reading each record's effective date; rows whose date does
//!   not parse drop out of the view without failing the request
//! - **Age derivation**: whole days from the effective date to a caller-supplied
//!   reference date
//! - **Threshold filtering**: keeping records strictly older than the threshold
//! - **Deduplication**: one record per entity, the one with the latest date
//! - **Metrics collection**: counting skipped, filtered and collapsed rows
//!
//! It also produces dated price series for charting via [`history`].
//!
//! # Pipeline
//!
//! | Step | Rule |
//! |------|------|
//! | Parse | date column → effective date, else skip the row |
//! | Derive | `age_days = reference_date - effective_date` (may be negative) |
//! | Threshold | keep `age_days > threshold_days` |
//! | Dedup | per entity key, keep the maximum effective date; ties keep the first row |
//! | Order | `age_days` descending; equal ages keep first-seen order |
//!
//! # Usage
//!
//! ## One-off Analysis
//!
//! ```
//! use chrono::NaiveDate;
//! use pricewatch_domain::{RecordSet, Value};
//! use pricewatch_staleness::analyze;
//!
//! let records = RecordSet::from_rows(
//!     vec!["자재명".to_string(), "효력시작일".to_string()],
//!     vec![
//!         vec![Value::from("Bolt-A"), Value::from("2024-01-01")],
//!         vec![Value::from("Bolt-A"), Value::from("2024-02-20")],
//!     ],
//! );
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let stale = analyze(&records, "자재명", "효력시작일", 7, today).unwrap();
//! assert_eq!(stale.len(), 1);
//! assert_eq!(stale[0].age_days, 10);
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use pricewatch_staleness::StalenessConfig;
//!
//! // Default: 90 days
//! let config = StalenessConfig::default();
//!
//! // Strict: 30 days
//! let config = StalenessConfig::strict();
//!
//! // Lenient: 180 days
//! let config = StalenessConfig::lenient();
//! ```
//!
//! # Configuration
//!
//! The Analyzer can be configured via TOML:
//!
//! ```toml
//! entity_column = "자재명"
//! date_column = "효력시작일"
//! threshold_days = 90
//! code_column = "자재코드"
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod history;
mod metrics;

pub use analyzer::{analyze, Analyzer};
pub use config::StalenessConfig;
pub use error::{SchemaError, StalenessError};
pub use history::{history, HistoryPoint};
pub use metrics::AnalysisMetrics;
