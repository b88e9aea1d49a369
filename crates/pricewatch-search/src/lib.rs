//! Pricewatch Search
//!
//! Filters an ingested record set against a free-text query.
//!
//! The search engine provides:
//! - Case-insensitive substring matching on canonical cell renderings
//! - All-column or named-column targeting (absent columns are skipped)
//! - Order-preserving results; the input set is never modified
//! - Optional result limits and match counts
//!
//! # Examples
//!
//! ```
//! use pricewatch_domain::{RecordSet, Value};
//! use pricewatch_search::{SearchConfig, SearchEngine};
//!
//! let records = RecordSet::from_rows(
//!     vec!["name".to_string(), "spec".to_string()],
//!     vec![vec![Value::from("Hex Bolt"), Value::from("M8")]],
//! );
//!
//! let engine = SearchEngine::new(SearchConfig::default().with_columns(["spec"])).unwrap();
//! let outcome = engine.search(&records, "m8");
//! assert_eq!(outcome.matched, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;

pub use config::{ColumnSelection, SearchConfig};
pub use engine::{search, SearchEngine, SearchOutcome};
pub use error::SearchError;
