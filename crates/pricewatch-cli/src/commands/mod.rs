//! Command implementations.
//!
//! Each command loads its spreadsheet once and hands the immutable record set
//! to a `render_*` function, which the REPL reuses against its session set.

pub mod describe;
pub mod history;
pub mod profile;
pub mod search;
pub mod show;
pub mod stale;

pub use self::describe::execute_describe;
pub use self::history::execute_history;
pub use self::profile::execute_profile;
pub use self::search::execute_search;
pub use self::show::execute_show;
pub use self::stale::execute_stale;

use crate::error::Result;
use chrono::{Local, NaiveDate};
use pricewatch_domain::RecordSet;
use pricewatch_ingest::{IngestConfig, Ingestor};
use std::path::Path;
use tracing::info;

/// Ingest a workbook or CSV file.
pub fn load_records(path: &Path, config: &IngestConfig) -> Result<RecordSet> {
    let ingestor = Ingestor::new(config.clone())?;
    let records = ingestor.ingest_path(path)?;
    info!(
        "Loaded {} rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
