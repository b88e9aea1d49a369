//! Free-text matching over record sets

use crate::{ColumnSelection, SearchConfig, SearchError};
use pricewatch_domain::{Record, RecordSet};
use tracing::debug;

/// Result of a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Matching records in original order, after any limit
    pub records: RecordSet,

    /// Records examined
    pub scanned: usize,

    /// Records that matched, before any limit
    pub matched: usize,

    /// Requested columns absent from the set
    pub skipped_columns: Vec<String>,
}

impl SearchOutcome {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the limit cut matches off
    pub fn truncated(&self) -> bool {
        self.matched > self.records.len()
    }
}

/// The search engine filters a record set against a free-text query
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::Config)?;
        Ok(Self { config })
    }

    /// Create an engine that searches every column without a limit
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Current configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search the configured default columns
    pub fn search(&self, records: &RecordSet, query: &str) -> SearchOutcome {
        self.search_columns(records, query, &self.config.selection())
    }

    /// Search an explicit column selection
    ///
    /// An empty query matches everything. The configured limit is applied
    /// after matching.
    pub fn search_columns(
        &self,
        records: &RecordSet,
        query: &str,
        columns: &ColumnSelection,
    ) -> SearchOutcome {
        let (targets, skipped_columns) = resolve_columns(records, columns);
        if !skipped_columns.is_empty() {
            debug!("Skipping absent columns: {:?}", skipped_columns);
        }

        let matches = if query.is_empty() {
            records.clone()
        } else {
            let needle = query.to_lowercase();
            records.filter(|record| matches_any(record, &targets, &needle))
        };

        let matched = matches.len();
        let records_out = match self.config.limit {
            Some(limit) if matched > limit => matches.truncated(limit),
            _ => matches,
        };

        debug!(
            "Query '{}' matched {} of {} records",
            query,
            matched,
            records.len()
        );

        SearchOutcome {
            records: records_out,
            scanned: records.len(),
            matched,
            skipped_columns,
        }
    }
}

/// Filter records whose targeted columns contain `query`, case-insensitively
///
/// The result preserves the input order. An empty query returns the input
/// unchanged; zero hits return an empty set with the input's columns.
///
/// # Examples
///
/// ```
/// use pricewatch_domain::{RecordSet, Value};
/// use pricewatch_search::{search, ColumnSelection};
///
/// let records = RecordSet::from_rows(
///     vec!["name".to_string()],
///     vec![vec![Value::from("Hex Bolt")], vec![Value::from("Nut")]],
/// );
///
/// let hits = search(&records, "bolt", &ColumnSelection::All);
/// assert_eq!(hits.len(), 1);
/// ```
pub fn search(records: &RecordSet, query: &str, columns: &ColumnSelection) -> RecordSet {
    SearchEngine::default_config()
        .search_columns(records, query, columns)
        .records
}

fn resolve_columns(records: &RecordSet, columns: &ColumnSelection) -> (Vec<usize>, Vec<String>) {
    match columns {
        ColumnSelection::All => ((0..records.columns().len()).collect(), Vec::new()),
        ColumnSelection::Only(names) => {
            let mut targets = Vec::with_capacity(names.len());
            let mut skipped = Vec::new();
            for name in names {
                match records.columns().iter().position(|c| c == name) {
                    Some(idx) if !targets.contains(&idx) => targets.push(idx),
                    Some(_) => {}
                    None => skipped.push(name.clone()),
                }
            }
            (targets, skipped)
        }
    }
}

fn matches_any(record: &Record, targets: &[usize], needle: &str) -> bool {
    targets
        .iter()
        .any(|&idx| record.values()[idx].render().to_lowercase().contains(needle))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use pricewatch_domain::Value;
    use proptest::prelude::*;

    fn record_set(rows: Vec<(String, String)>) -> RecordSet {
        RecordSet::from_rows(
            vec!["name".to_string(), "spec".to_string()],
            rows.into_iter()
                .map(|(a, b)| vec![Value::Text(a), Value::Text(b)])
                .collect(),
        )
    }

    fn rows() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-zA-Z ]{0,8}", "[a-zA-Z0-9]{0,6}"), 0..20)
    }

    proptest! {
        /// Property: searching a result again with the same query changes nothing
        #[test]
        fn test_search_idempotent(rows in rows(), query in "[a-zA-Z]{0,3}") {
            let records = record_set(rows);
            let once = search(&records, &query, &ColumnSelection::All);
            let twice = search(&once, &query, &ColumnSelection::All);
            prop_assert_eq!(once, twice);
        }

        /// Property: a record is kept iff some column contains the query, ignoring case
        #[test]
        fn test_substring_property(rows in rows(), query in "[a-zA-Z]{1,3}") {
            let records = record_set(rows);
            let hits = search(&records, &query, &ColumnSelection::All);
            let needle = query.to_lowercase();

            let expected: Vec<_> = records
                .iter()
                .filter(|r| r.values().iter().any(|v| v.render().to_lowercase().contains(&needle)))
                .cloned()
                .collect();
            prop_assert_eq!(hits.records(), expected.as_slice());
        }
    }
}
