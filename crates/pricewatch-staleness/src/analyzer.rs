//! Core Analyzer implementation: age derivation, threshold, dedup, ordering

use crate::{AnalysisMetrics, SchemaError, StalenessConfig, StalenessError};
use chrono::NaiveDate;
use pricewatch_domain::{LabelSpec, RecordSet, StalenessRecord};
use std::collections::HashMap;
use tracing::{debug, info};

/// Analyzer for price staleness
///
/// Responsible for:
/// - Parsing each record's effective date (unparseable rows are skipped)
/// - Deriving `age_days` against an injected reference date
/// - Keeping records strictly older than the threshold
/// - Collapsing each entity to its latest stale record
/// - Collecting metrics across runs
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricewatch_domain::{RecordSet, Value};
/// use pricewatch_staleness::{Analyzer, StalenessConfig};
///
/// let records = RecordSet::from_rows(
///     vec!["name".to_string(), "date".to_string()],
///     vec![vec![Value::from("Bolt-A"), Value::from("2024-01-01")]],
/// );
///
/// let config = StalenessConfig::strict().with_columns("name", "date");
/// let mut analyzer = Analyzer::new(config).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let stale = analyzer.analyze(&records, today).unwrap();
/// assert_eq!(stale[0].age_days, 60);
/// println!("{}", analyzer.metrics().summary());
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: StalenessConfig,
    metrics: AnalysisMetrics,
}

impl Analyzer {
    /// Create a new Analyzer, rejecting an invalid configuration
    pub fn new(config: StalenessConfig) -> Result<Self, StalenessError> {
        config.validate().map_err(StalenessError::Config)?;
        Ok(Self {
            config,
            metrics: AnalysisMetrics::new(),
        })
    }

    /// Create an Analyzer with default configuration
    pub fn default_config() -> Self {
        Self {
            config: StalenessConfig::default(),
            metrics: AnalysisMetrics::new(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &StalenessConfig {
        &self.config
    }

    /// Get a reference to the accumulated metrics
    pub fn metrics(&self) -> &AnalysisMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Label specification matching the configured columns
    pub fn labels(&self) -> LabelSpec {
        let labels = LabelSpec::new(self.config.entity_column.clone());
        match &self.config.code_column {
            Some(code) => labels.with_code(code.clone()),
            None => labels,
        }
    }

    /// Run an analysis with the configured columns and threshold
    pub fn analyze(
        &mut self,
        records: &RecordSet,
        reference_date: NaiveDate,
    ) -> Result<Vec<StalenessRecord>, SchemaError> {
        self.analyze_with_threshold(records, self.config.threshold_days, reference_date)
    }

    /// Run an analysis overriding the configured threshold
    pub fn analyze_with_threshold(
        &mut self,
        records: &RecordSet,
        threshold_days: u32,
        reference_date: NaiveDate,
    ) -> Result<Vec<StalenessRecord>, SchemaError> {
        let mut run = AnalysisMetrics::new();
        let result = run_analysis(
            records,
            &self.config.entity_column,
            &self.config.date_column,
            threshold_days,
            reference_date,
            &mut run,
        )?;
        self.metrics.absorb(&run);
        Ok(result)
    }
}

/// Find entities whose latest stale record is older than `threshold_days`
///
/// Fails when `entity_key_column` or `date_column` is absent (the entity column
/// is checked first). Rows whose date does not parse are skipped.
pub fn analyze(
    records: &RecordSet,
    entity_key_column: &str,
    date_column: &str,
    threshold_days: u32,
    reference_date: NaiveDate,
) -> Result<Vec<StalenessRecord>, SchemaError> {
    let mut run = AnalysisMetrics::new();
    run_analysis(
        records,
        entity_key_column,
        date_column,
        threshold_days,
        reference_date,
        &mut run,
    )
}

/// Fail with the first of `columns` missing from the set
pub(crate) fn require_columns(records: &RecordSet, columns: &[&str]) -> Result<(), SchemaError> {
    match columns.iter().find(|c| !records.has_column(c)) {
        Some(missing) => Err(SchemaError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

fn run_analysis(
    records: &RecordSet,
    entity_column: &str,
    date_column: &str,
    threshold_days: u32,
    reference_date: NaiveDate,
    metrics: &mut AnalysisMetrics,
) -> Result<Vec<StalenessRecord>, SchemaError> {
    require_columns(records, &[entity_column, date_column])?;
    let threshold = i64::from(threshold_days);

    let mut survivors: Vec<StalenessRecord> = Vec::new();
    let mut by_entity: HashMap<String, usize> = HashMap::new();

    for (position, record) in records.iter().enumerate() {
        metrics.rows_scanned += 1;

        let Some(effective_date) = record.get(date_column).and_then(|v| v.as_date()) else {
            metrics.rows_skipped += 1;
            debug!(
                "Row {}: unparseable '{}' value {:?}, skipped",
                position + 1,
                date_column,
                record.render(date_column).unwrap_or_default()
            );
            continue;
        };

        let key = record.render(entity_column).unwrap_or_default();
        if key.trim().is_empty() {
            metrics.rows_without_entity += 1;
            debug!("Row {}: blank '{}', skipped", position + 1, entity_column);
            continue;
        }

        let candidate = StalenessRecord::derive(record.clone(), effective_date, reference_date);
        if candidate.age_days <= threshold {
            metrics.rows_under_threshold += 1;
            continue;
        }

        match by_entity.get(&key) {
            Some(&idx) => {
                metrics.duplicates_collapsed += 1;
                if candidate.effective_date > survivors[idx].effective_date {
                    survivors[idx] = candidate;
                }
            }
            None => {
                by_entity.insert(key, survivors.len());
                survivors.push(candidate);
            }
        }
    }

    survivors.sort_by(|a, b| b.age_days.cmp(&a.age_days));

    metrics.entities_reported = survivors.len();
    metrics.analysis_count = 1;
    info!(
        "Staleness analysis: {} rows scanned, {} stale entities (threshold {} days, reference {})",
        metrics.rows_scanned, metrics.entities_reported, threshold_days, reference_date
    );

    Ok(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricewatch_domain::Value;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn days_ago(days: i64) -> Value {
        Value::Date(reference() - chrono::Duration::days(days))
    }

    fn set(rows: Vec<(&str, Value)>) -> RecordSet {
        RecordSet::from_rows(
            vec!["name".to_string(), "date".to_string()],
            rows.into_iter()
                .map(|(name, date)| vec![Value::from(name), date])
                .collect(),
        )
    }

    #[test]
    fn test_missing_columns_entity_first() {
        let records = set(vec![]);
        let err = analyze(&records, "자재명", "효력시작일", 30, reference()).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn("자재명".to_string()));

        let err = analyze(&records, "name", "효력시작일", 30, reference()).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn("효력시작일".to_string()));
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let result = analyze(&set(vec![]), "name", "date", 30, reference()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_blank_entities_are_skipped() {
        let records = set(vec![("", days_ago(100)), ("Bolt", days_ago(100))]);
        let mut analyzer =
            Analyzer::new(StalenessConfig::default().with_columns("name", "date")).unwrap();
        let result = analyzer.analyze(&records, reference()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(analyzer.metrics().rows_without_entity, 1);
    }

    #[test]
    fn test_blank_entity_counted_before_threshold() {
        let records = set(vec![("", days_ago(5)), ("  ", days_ago(200)), ("Bolt", days_ago(5))]);
        let mut analyzer =
            Analyzer::new(StalenessConfig::default().with_columns("name", "date")).unwrap();
        let result = analyzer.analyze(&records, reference()).unwrap();

        assert!(result.is_empty());
        let metrics = analyzer.metrics();
        assert_eq!(metrics.rows_without_entity, 2);
        assert_eq!(metrics.rows_under_threshold, 1);
        assert_eq!(
            metrics.rows_skipped + metrics.rows_without_entity + metrics.rows_under_threshold,
            metrics.rows_scanned
        );
    }

    #[test]
    fn test_analyzer_metrics_accumulate() {
        let records = set(vec![
            ("Bolt", days_ago(100)),
            ("Bolt", days_ago(95)),
            ("Nut", days_ago(10)),
            ("Washer", Value::from("N/A")),
        ]);
        let mut analyzer =
            Analyzer::new(StalenessConfig::default().with_columns("name", "date")).unwrap();

        analyzer.analyze(&records, reference()).unwrap();
        let metrics = analyzer.metrics();
        assert_eq!(metrics.rows_scanned, 4);
        assert_eq!(metrics.rows_skipped, 1);
        assert_eq!(metrics.rows_under_threshold, 1);
        assert_eq!(metrics.duplicates_collapsed, 1);
        assert_eq!(metrics.entities_reported, 1);

        analyzer.analyze(&records, reference()).unwrap();
        assert_eq!(analyzer.metrics().analysis_count, 2);
        assert_eq!(analyzer.metrics().rows_scanned, 8);

        analyzer.reset_metrics();
        assert_eq!(analyzer.metrics().analysis_count, 0);
    }

    #[test]
    fn test_threshold_override() {
        let records = set(vec![("Bolt", days_ago(40))]);
        let mut analyzer =
            Analyzer::new(StalenessConfig::default().with_columns("name", "date")).unwrap();
        assert!(analyzer.analyze(&records, reference()).unwrap().is_empty());
        assert_eq!(
            analyzer
                .analyze_with_threshold(&records, 30, reference())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Analyzer::new(StalenessConfig::default().with_columns("", "date")).unwrap_err();
        assert!(matches!(err, StalenessError::Config(_)));
    }

    #[test]
    fn test_labels_follow_config() {
        let analyzer = Analyzer::new(
            StalenessConfig::default()
                .with_columns("name", "date")
                .with_code_column("code"),
        )
        .unwrap();
        let labels = analyzer.labels();
        assert_eq!(labels.entity_column, "name");
        assert_eq!(labels.code_column.as_deref(), Some("code"));
    }
}
