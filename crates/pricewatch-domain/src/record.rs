//! Record module - rows and the immutable record set they belong to

use crate::Value;
use std::sync::Arc;

/// An ordered mapping from column name to value
///
/// Every record of a [`RecordSet`] shares the set's column list, so all records
/// within one set have identical keys in identical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Create a record over a shared column list
    ///
    /// Short value lists are padded with [`Value::Empty`]; surplus values are dropped.
    pub fn new(columns: Arc<[String]>, mut values: Vec<Value>) -> Self {
        values.resize(columns.len(), Value::Empty);
        Self { columns, values }
    }

    /// Get the value of a column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    /// Canonical rendering of a column's value
    pub fn render(&self, column: &str) -> Option<String> {
        self.get(column).map(Value::render)
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values, in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate over `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered sequence of records plus their shared column names
///
/// A `RecordSet` is produced once by the ingestor and then only read.
/// Filtering operations return new sets; the source is never modified, so the
/// same ingested set can be re-filtered any number of times without
/// cross-contamination.
///
/// # Examples
///
/// ```
/// use pricewatch_domain::{RecordSet, Value};
///
/// let set = RecordSet::from_rows(
///     vec!["name".to_string(), "price".to_string()],
///     vec![
///         vec![Value::from("Bolt-A"), Value::from(120.0)],
///         vec![Value::from("Nut-B"), Value::from(15.0)],
///     ],
/// );
///
/// let cheap = set.filter(|r| r.get("price").and_then(Value::as_number) < Some(100.0));
/// assert_eq!(cheap.len(), 1);
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    columns: Arc<[String]>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty set with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: Arc::from(columns),
            records: Vec::new(),
        }
    }

    /// Create an empty set with no columns
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build a set from raw rows; each row is padded or truncated to the column count
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let columns: Arc<[String]> = Arc::from(columns);
        let records = rows
            .into_iter()
            .map(|values| Record::new(Arc::clone(&columns), values))
            .collect();
        Self { columns, records }
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the set has a column with this exact name
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Records, in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return a new set holding the records that satisfy `predicate`, in order
    pub fn filter<F>(&self, mut predicate: F) -> RecordSet
    where
        F: FnMut(&Record) -> bool,
    {
        Self {
            columns: Arc::clone(&self.columns),
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Return a new set holding at most the first `limit` records
    pub fn truncated(&self, limit: usize) -> RecordSet {
        Self {
            columns: Arc::clone(&self.columns),
            records: self.records.iter().take(limit).cloned().collect(),
        }
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::from_rows(
            vec!["자재명".to_string(), "단가".to_string(), "비고".to_string()],
            vec![
                vec![Value::from("Bolt-A"), Value::from(120.0), Value::from("x")],
                vec![Value::from("Nut-B"), Value::from(15.0)],
            ],
        )
    }

    #[test]
    fn test_rows_share_columns() {
        let set = sample();
        for record in &set {
            assert_eq!(record.columns(), set.columns());
            assert_eq!(record.len(), 3);
        }
    }

    #[test]
    fn test_short_rows_are_padded() {
        let set = sample();
        assert_eq!(set.records()[1].get("비고"), Some(&Value::Empty));
    }

    #[test]
    fn test_surplus_values_are_dropped() {
        let set = RecordSet::from_rows(
            vec!["a".to_string()],
            vec![vec![Value::from("1"), Value::from("2")]],
        );
        assert_eq!(set.records()[0].values(), &[Value::from("1")]);
    }

    #[test]
    fn test_get_missing_column() {
        let set = sample();
        assert!(set.records()[0].get("missing").is_none());
        assert!(!set.has_column("missing"));
        assert!(set.has_column("단가"));
    }

    #[test]
    fn test_filter_is_non_destructive() {
        let set = sample();
        let before = set.clone();
        let filtered = set.filter(|r| r.render("자재명").as_deref() == Some("Nut-B"));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.columns(), set.columns());
        assert_eq!(set, before);
    }

    #[test]
    fn test_iter_pairs_in_column_order() {
        let set = sample();
        let pairs: Vec<(&str, String)> = set.records()[0]
            .iter()
            .map(|(c, v)| (c, v.render()))
            .collect();
        assert_eq!(
            pairs,
            vec![("자재명", "Bolt-A".to_string()), ("단가", "120".to_string()), ("비고", "x".to_string())]
        );
    }

    #[test]
    fn test_truncated() {
        let set = sample();
        assert_eq!(set.truncated(1).len(), 1);
        assert_eq!(set.truncated(10).len(), 2);
    }
}
