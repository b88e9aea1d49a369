//! Descriptive statistics for the numeric columns of a record set

use crate::{RecordSet, Value};
use serde::Serialize;

/// Summary statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Column name
    pub column: String,
    /// Non-empty values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (`None` for fewer than two values)
    pub std: Option<f64>,
    /// Minimum
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum
    pub max: f64,
}

/// Summarize every numeric column, in column order
///
/// A column is numeric when it holds at least one number and every non-empty
/// cell is a number. Quartiles use linear interpolation between closest ranks.
pub fn describe(records: &RecordSet) -> Vec<ColumnSummary> {
    records
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(idx, column)| {
            let mut numbers = Vec::with_capacity(records.len());
            for record in records {
                match &record.values()[idx] {
                    Value::Empty => {}
                    Value::Number(n) => numbers.push(*n),
                    _ => return None,
                }
            }
            summarize(column, numbers)
        })
        .collect()
}

fn summarize(column: &str, mut numbers: Vec<f64>) -> Option<ColumnSummary> {
    if numbers.is_empty() {
        return None;
    }
    numbers.sort_by(f64::total_cmp);

    let count = numbers.len();
    let mean = numbers.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let variance = numbers.iter().map(|n| (n - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    });

    Some(ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: numbers[0],
        q1: quantile(&numbers, 0.25),
        median: quantile(&numbers, 0.5),
        q3: quantile(&numbers, 0.75),
        max: numbers[count - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rows: Vec<Vec<Value>>) -> RecordSet {
        RecordSet::from_rows(vec!["name".to_string(), "price".to_string()], rows)
    }

    #[test]
    fn test_numeric_column_summary() {
        let records = set(vec![
            vec![Value::from("a"), Value::from(1.0)],
            vec![Value::from("b"), Value::from(2.0)],
            vec![Value::from("c"), Value::from(3.0)],
            vec![Value::from("d"), Value::from(4.0)],
            vec![Value::from("e"), Value::Empty],
        ]);

        let summary = describe(&records);
        assert_eq!(summary.len(), 1);

        let price = &summary[0];
        assert_eq!(price.column, "price");
        assert_eq!(price.count, 4);
        assert_eq!(price.mean, 2.5);
        assert_eq!(price.min, 1.0);
        assert_eq!(price.q1, 1.75);
        assert_eq!(price.median, 2.5);
        assert_eq!(price.q3, 3.25);
        assert_eq!(price.max, 4.0);
        let std = price.std.unwrap();
        assert!((std - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn test_mixed_column_is_skipped() {
        let records = set(vec![
            vec![Value::from("a"), Value::from(1.0)],
            vec![Value::from("b"), Value::from("n/a")],
        ]);
        assert!(describe(&records).is_empty());
    }

    #[test]
    fn test_single_value_has_no_std() {
        let records = set(vec![vec![Value::from("a"), Value::from(7.0)]]);
        let summary = describe(&records);
        assert_eq!(summary[0].std, None);
        assert_eq!(summary[0].median, 7.0);
    }

    #[test]
    fn test_empty_set() {
        assert!(describe(&RecordSet::empty()).is_empty());
    }
}
