//! Projection module - focus filtering and labelling for display
//!
//! This is the boundary handed to a table or chart renderer. It never reorders
//! or mutates its input; it only filters by entity key and computes labels.

use crate::traits::Projectable;
use crate::Record;
use chrono::NaiveDate;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

/// Which rows to display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// Every row
    #[default]
    All,

    /// Only rows whose entity key renders exactly as this string
    Entity(String),
}

impl Focus {
    /// Parse a UI selector: blank or `all` (any case) selects everything
    pub fn from_selector(selector: &str) -> Self {
        let trimmed = selector.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Focus::All
        } else {
            Focus::Entity(trimmed.to_string())
        }
    }

    fn admits(&self, record: &Record, entity_column: &str) -> bool {
        match self {
            Focus::All => true,
            Focus::Entity(key) => record.render(entity_column).as_deref() == Some(key.as_str()),
        }
    }
}

/// How to label a projected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Column holding the entity key (e.g. a material name)
    pub entity_column: String,

    /// Optional column appended in parentheses (e.g. a material code)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_column: Option<String>,
}

impl LabelSpec {
    /// Label rows by entity key only
    pub fn new(entity_column: impl Into<String>) -> Self {
        Self {
            entity_column: entity_column.into(),
            code_column: None,
        }
    }

    /// Also append a code column to each label
    pub fn with_code(mut self, code_column: impl Into<String>) -> Self {
        self.code_column = Some(code_column.into());
        self
    }

    /// Compute the label for a record at a 1-based position
    pub fn label_for(&self, record: &Record, position: usize) -> String {
        let entity = record
            .render(&self.entity_column)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("#{}", position));

        let code = self
            .code_column
            .as_deref()
            .and_then(|column| record.render(column))
            .filter(|s| !s.is_empty());

        match code {
            Some(code) => format!("{} ({})", entity, code),
            None => entity,
        }
    }
}

/// A row ready for tabular or chart rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    /// Display label
    pub label: String,

    /// Rendered cells, in column order
    pub cells: Vec<(String, String)>,

    /// Age in days, for staleness rows
    pub age_days: Option<i64>,

    /// Effective date, for staleness rows
    pub effective_date: Option<NaiveDate>,
}

impl ProjectedRow {
    /// Rendered value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }
}

struct OrderedCells<'a>(&'a [(String, String)]);

impl Serialize for OrderedCells<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in self.0 {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl Serialize for ProjectedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("ProjectedRow", 4)?;
        row.serialize_field("label", &self.label)?;
        row.serialize_field("values", &OrderedCells(&self.cells))?;
        row.serialize_field("age_days", &self.age_days)?;
        row.serialize_field("effective_date", &self.effective_date)?;
        row.end()
    }
}

/// Filter rows by focus and attach labels, preserving input order
///
/// # Examples
///
/// ```
/// use pricewatch_domain::{project, Focus, LabelSpec, RecordSet, Value};
///
/// let set = RecordSet::from_rows(
///     vec!["name".to_string(), "code".to_string()],
///     vec![
///         vec![Value::from("Bolt-A"), Value::from("B-01")],
///         vec![Value::from("Nut-B"), Value::from("N-07")],
///     ],
/// );
///
/// let labels = LabelSpec::new("name").with_code("code");
/// let rows = project(set.records(), &Focus::Entity("Nut-B".into()), &labels);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].label, "Nut-B (N-07)");
/// ```
pub fn project<P: Projectable>(records: &[P], focus: &Focus, labels: &LabelSpec) -> Vec<ProjectedRow> {
    records
        .iter()
        .enumerate()
        .filter(|(_, item)| focus.admits(item.record(), &labels.entity_column))
        .map(|(idx, item)| {
            let record = item.record();
            ProjectedRow {
                label: labels.label_for(record, idx + 1),
                cells: record
                    .iter()
                    .map(|(column, value)| (column.to_string(), value.render()))
                    .collect(),
                age_days: item.age_days(),
                effective_date: item.effective_date(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordSet, StalenessRecord, Value};

    fn sample() -> RecordSet {
        RecordSet::from_rows(
            vec!["자재명".to_string(), "자재코드".to_string(), "단가".to_string()],
            vec![
                vec![Value::from("Bolt-A"), Value::from("B-01"), Value::from(120.0)],
                vec![Value::from("Nut-B"), Value::Empty, Value::from(15.0)],
                vec![Value::Empty, Value::from("X-99"), Value::from(1.5)],
                vec![Value::from("Bolt-A"), Value::from("B-02"), Value::from(125.0)],
            ],
        )
    }

    #[test]
    fn test_focus_all_keeps_order() {
        let set = sample();
        let rows = project(set.records(), &Focus::All, &LabelSpec::new("자재명"));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Bolt-A", "Nut-B", "#3", "Bolt-A"]);
    }

    #[test]
    fn test_focus_entity_is_exact_match() {
        let set = sample();
        let rows = project(set.records(), &Focus::Entity("Bolt-A".into()), &LabelSpec::new("자재명"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("단가"), Some("120"));
        assert_eq!(rows[1].get("단가"), Some("125"));

        let rows = project(set.records(), &Focus::Entity("bolt-a".into()), &LabelSpec::new("자재명"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_labels_with_code() {
        let set = sample();
        let labels = LabelSpec::new("자재명").with_code("자재코드");
        let rows = project(set.records(), &Focus::All, &labels);
        assert_eq!(rows[0].label, "Bolt-A (B-01)");
        assert_eq!(rows[1].label, "Nut-B");
        assert_eq!(rows[2].label, "#3 (X-99)");
    }

    #[test]
    fn test_missing_entity_column() {
        let set = sample();
        let rows = project(set.records(), &Focus::All, &LabelSpec::new("없음"));
        assert_eq!(rows[1].label, "#2");

        let rows = project(set.records(), &Focus::Entity("Bolt-A".into()), &LabelSpec::new("없음"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_staleness_rows_carry_derived_fields() {
        let set = sample();
        let reference = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let effective = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stale = vec![StalenessRecord::derive(set.records()[0].clone(), effective, reference)];

        let rows = project(&stale, &Focus::All, &LabelSpec::new("자재명"));
        assert_eq!(rows[0].age_days, Some(60));
        assert_eq!(rows[0].effective_date, Some(effective));
    }

    #[test]
    fn test_focus_from_selector() {
        assert_eq!(Focus::from_selector(""), Focus::All);
        assert_eq!(Focus::from_selector("ALL"), Focus::All);
        assert_eq!(Focus::from_selector(" Bolt-A "), Focus::Entity("Bolt-A".into()));
    }

    #[test]
    fn test_serialized_values_keep_column_order() {
        let set = sample();
        let rows = project(set.records(), &Focus::All, &LabelSpec::new("자재명"));
        let json = serde_json::to_string(&rows[0]).unwrap();
        assert_eq!(
            json,
            r#"{"label":"Bolt-A","values":{"자재명":"Bolt-A","자재코드":"B-01","단가":"120"},"age_days":null,"effective_date":null}"#
        );
    }
}
