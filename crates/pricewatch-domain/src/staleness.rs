//! Staleness module - records augmented with their effective date and age

use crate::Record;
use chrono::NaiveDate;

/// A record with the two fields derived by staleness analysis
///
/// Computed fresh on every analysis call and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StalenessRecord {
    /// The source record, unchanged
    pub record: Record,

    /// Parsed value of the date column
    pub effective_date: NaiveDate,

    /// Whole days from `effective_date` to the reference date (negative for future dates)
    pub age_days: i64,
}

impl StalenessRecord {
    /// Derive a staleness record against a reference date
    pub fn derive(record: Record, effective_date: NaiveDate, reference_date: NaiveDate) -> Self {
        Self {
            record,
            effective_date,
            age_days: (reference_date - effective_date).num_days(),
        }
    }

    /// Rendered value of the entity key column (empty when absent)
    pub fn entity_key(&self, column: &str) -> String {
        self.record.render(column).unwrap_or_default()
    }
}
