//! Cell coercion to the most specific lossless value

use calamine::Data;
use pricewatch_domain::value::{datetime_value, parse_temporal, render_number};
use pricewatch_domain::Value;

/// Coerce a raw text cell
///
/// Blank text becomes `Empty`. Text that reads as a date or timestamp becomes a
/// date. Text becomes a number only when the number renders back to exactly
/// the same text, so codes like `00123` and amounts like `1,200` stay text.
/// Everything else is kept verbatim.
pub fn coerce_text(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Empty;
    }
    if let Some(temporal) = parse_temporal(trimmed) {
        return temporal;
    }
    if let Some(n) = parse_lossless_number(trimmed) {
        return Value::Number(n);
    }
    Value::Text(raw.to_string())
}

/// Coerce a typed workbook cell
pub fn coerce_cell(cell: &Data) -> Value {
    #[allow(unreachable_patterns)]
    match cell {
        Data::Empty => Value::Empty,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::String(s) => coerce_text(s),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return Value::Number(dt.as_f64());
            }
            match dt.as_datetime() {
                Some(datetime) => datetime_value(datetime),
                None => Value::Number(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) => coerce_text(s),
        Data::Error(e) => Value::Text(e.to_string()),
        other => Value::Text(other.to_string()),
    }
}

/// Header text for a workbook cell, verbatim for strings
pub fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => coerce_cell(other).render(),
    }
}

fn parse_lossless_number(text: &str) -> Option<f64> {
    let n: f64 = text.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    (render_number(n) == text).then_some(n)
}
