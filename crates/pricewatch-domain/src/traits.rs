//! Trait definitions shared across layers
//!
//! These traits let the presentation layer treat plain search results and
//! staleness results uniformly.

use crate::{Record, StalenessRecord};
use chrono::NaiveDate;

/// Anything that can be projected for display
///
/// Implemented for plain [`Record`]s (search output) and for
/// [`StalenessRecord`]s (analysis output, which also carries derived fields).
pub trait Projectable {
    /// The underlying record
    fn record(&self) -> &Record;

    /// Parsed effective date, if this row went through staleness analysis
    fn effective_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Age in days, if this row went through staleness analysis
    fn age_days(&self) -> Option<i64> {
        None
    }
}

impl Projectable for Record {
    fn record(&self) -> &Record {
        self
    }
}

impl Projectable for StalenessRecord {
    fn record(&self) -> &Record {
        &self.record
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        Some(self.effective_date)
    }

    fn age_days(&self) -> Option<i64> {
        Some(self.age_days)
    }
}
