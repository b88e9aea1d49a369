//! Metrics collection for staleness analysis

/// Counters collected across analysis runs
///
/// Tracks how many rows were examined and why rows dropped out of the view.
/// A dropped row is counted once, by the first check it fails: date, then
/// entity key, then threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisMetrics {
    /// Rows examined
    pub rows_scanned: usize,

    /// Rows whose date did not parse
    pub rows_skipped: usize,

    /// Rows with a blank entity key
    pub rows_without_entity: usize,

    /// Rows with a date and an entity key that are not older than the threshold
    pub rows_under_threshold: usize,

    /// Stale rows superseded by a later record of the same entity
    pub duplicates_collapsed: usize,

    /// Entities in the result
    pub entities_reported: usize,

    /// Completed analysis runs
    pub analysis_count: usize,
}

impl AnalysisMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another run's counters to these
    pub fn absorb(&mut self, run: &AnalysisMetrics) {
        self.rows_scanned += run.rows_scanned;
        self.rows_skipped += run.rows_skipped;
        self.rows_without_entity += run.rows_without_entity;
        self.rows_under_threshold += run.rows_under_threshold;
        self.duplicates_collapsed += run.duplicates_collapsed;
        self.entities_reported += run.entities_reported;
        self.analysis_count += run.analysis_count;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Staleness Analysis Summary".to_string(),
            "==========================".to_string(),
            format!("Analysis runs: {}", self.analysis_count),
            format!("Rows scanned: {}", self.rows_scanned),
        ];

        if self.rows_skipped > 0 {
            lines.push(format!("Rows skipped (unparseable date): {}", self.rows_skipped));
        }
        if self.rows_without_entity > 0 {
            lines.push(format!("Rows skipped (blank entity): {}", self.rows_without_entity));
        }

        lines.push(format!("Rows within threshold: {}", self.rows_under_threshold));
        lines.push(format!("Duplicates collapsed: {}", self.duplicates_collapsed));
        lines.push(format!("Stale entities: {}", self.entities_reported));

        lines.join("\n")
    }
}
