//! Value module - scalar cells and their canonical rendering

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// Date-only layouts recognised in text cells
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Date-and-time layouts recognised in text cells
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Compact `YYYYMMDD` layout, accepted only when a date is explicitly expected
const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Rendering layout for `Value::Date`
const DATE_RENDER: &str = "%Y-%m-%d";

/// Rendering layout for `Value::DateTime`
const DATETIME_RENDER: &str = "%Y-%m-%d %H:%M:%S";

/// Integral numbers below this magnitude render without a fractional part
const INTEGRAL_RENDER_LIMIT: f64 = 1e15;

/// A single cell value
///
/// Cells are coerced to the most specific of {date, number, string} at ingest
/// time. Every variant has exactly one canonical textual form (see [`Value::render`])
/// so that substring search is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Blank cell
    #[default]
    Empty,

    /// Free text, kept verbatim
    Text(String),

    /// Numeric cell
    Number(f64),

    /// Calendar date without a time component
    Date(NaiveDate),

    /// Date with a non-midnight time component
    DateTime(NaiveDateTime),
}

impl Value {
    /// Canonical textual form of the value
    ///
    /// # Examples
    ///
    /// ```
    /// use pricewatch_domain::Value;
    /// use chrono::NaiveDate;
    ///
    /// assert_eq!(Value::Number(1200.0).render(), "1200");
    /// assert_eq!(Value::Number(0.5).render(), "0.5");
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    /// assert_eq!(Value::Date(date).render(), "2024-03-09");
    /// assert_eq!(Value::Empty.render(), "");
    /// ```
    pub fn render(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Text(text) => text.clone(),
            Value::Number(n) => render_number(*n),
            Value::Date(date) => date.format(DATE_RENDER).to_string(),
            Value::DateTime(dt) => dt.format(DATETIME_RENDER).to_string(),
        }
    }

    /// Whether the cell is blank
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Interpret the value as an effective date
    ///
    /// Accepts typed dates, text in any of [`DATE_FORMATS`] / [`DATETIME_FORMATS`],
    /// RFC 3339 timestamps, and compact `YYYYMMDD` given either as text or as an
    /// integral number. Returns `None` for anything else.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            Value::DateTime(dt) => Some(dt.date()),
            Value::Text(text) => {
                let trimmed = text.trim();
                match parse_temporal(trimmed) {
                    Some(Value::Date(date)) => Some(date),
                    Some(Value::DateTime(dt)) => Some(dt.date()),
                    _ => parse_compact_date(trimmed),
                }
            }
            Value::Number(n) => {
                if n.fract() == 0.0 && (10_000_000.0..100_000_000.0).contains(n) {
                    parse_compact_date(&format!("{}", *n as i64))
                } else {
                    None
                }
            }
            Value::Empty => None,
        }
    }

    /// Interpret the value as a number
    ///
    /// Text is accepted when it parses after removing thousands separators.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(text) => text
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::Date(date)
    }
}

/// Render a number in its canonical decimal form
pub fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < INTEGRAL_RENDER_LIMIT {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse text that unambiguously denotes a date or a timestamp
///
/// Returns `Value::Date` for date-only text and for timestamps at midnight,
/// `Value::DateTime` otherwise. Text must start with a four-digit year.
pub fn parse_temporal(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    if bytes.len() < 8 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(Value::Date(date));
        }
    }

    let datetime = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_local()))?;

    Some(datetime_value(datetime))
}

/// Collapse a midnight timestamp to a plain date
pub fn datetime_value(datetime: NaiveDateTime) -> Value {
    if datetime.num_seconds_from_midnight() == 0 && datetime.nanosecond() == 0 {
        Value::Date(datetime.date())
    } else {
        Value::DateTime(datetime)
    }
}

fn parse_compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(text, COMPACT_DATE_FORMAT).ok()
}
