//! Pricewatch Domain Layer
//!
//! This crate contains the core data model shared by every other Pricewatch crate.
//! It depends only on `chrono` (calendar dates) and `serde` (output boundary) and
//! defines the value objects and trait interfaces that the ingest, search and
//! staleness layers build upon.
//!
//! ## Key Concepts
//!
//! - **Value**: A scalar cell (text, number, date) with a deterministic rendering
//! - **Record**: An ordered mapping from column name to value
//! - **RecordSet**: Records plus their shared column list; never mutated in place
//! - **StalenessRecord**: A record with its parsed effective date and age in days
//! - **Projection**: The focus filter and labelling handed to a renderer
//!
//! ## Architecture
//!
//! - Pure data and pure functions only
//! - No I/O, no logging, no global state
//! - Every operation returns a new value and leaves its input untouched

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod projection;
pub mod record;
pub mod staleness;
pub mod summary;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use projection::{project, Focus, LabelSpec, ProjectedRow};
pub use record::{Record, RecordSet};
pub use staleness::StalenessRecord;
pub use summary::{describe, ColumnSummary};
pub use traits::Projectable;
pub use value::Value;
