//! Price history over a trailing window

use crate::analyzer::require_columns;
use crate::{Analyzer, SchemaError};
use chrono::{Duration, NaiveDate};
use pricewatch_domain::{Projectable, Record, RecordSet};
use serde::Serialize;
use tracing::debug;

/// One dated value of a price series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// Date of the observation
    pub date: NaiveDate,

    /// Numeric value on that date
    pub value: f64,

    /// Source record
    #[serde(skip)]
    pub record: Record,
}

impl Projectable for HistoryPoint {
    fn record(&self) -> &Record {
        &self.record
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

/// Points dated on or after `reference_date - window_days`, oldest first
///
/// A window reaching past the earliest representable date keeps every point.
/// Rows whose date or value does not parse are skipped. Dates after the
/// reference date are kept. Points sharing a date keep their input order.
pub fn history(
    records: &RecordSet,
    date_column: &str,
    value_column: &str,
    window_days: u32,
    reference_date: NaiveDate,
) -> Result<Vec<HistoryPoint>, SchemaError> {
    require_columns(records, &[date_column, value_column])?;
    let since = reference_date
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);

    let mut skipped = 0usize;
    let mut points: Vec<HistoryPoint> = records
        .iter()
        .filter_map(|record| {
            let date = record.get(date_column).and_then(|v| v.as_date());
            let value = record.get(value_column).and_then(|v| v.as_number());
            match (date, value) {
                (Some(date), Some(value)) => Some(HistoryPoint {
                    date,
                    value,
                    record: record.clone(),
                }),
                _ => {
                    skipped += 1;
                    None
                }
            }
        })
        .filter(|point| point.date >= since)
        .collect();

    points.sort_by_key(|point| point.date);

    debug!(
        "History since {}: {} points, {} rows skipped",
        since,
        points.len(),
        skipped
    );
    Ok(points)
}

impl Analyzer {
    /// Price history using the configured date column
    pub fn history(
        &self,
        records: &RecordSet,
        value_column: &str,
        window_days: u32,
        reference_date: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, SchemaError> {
        history(
            records,
            &self.config().date_column,
            value_column,
            window_days,
            reference_date,
        )
    }
}
