//! Core Ingestor implementation

use crate::coerce::{coerce_cell, coerce_text, header_text};
use crate::config::{IngestConfig, InputFormat, SheetSelector};
use crate::detect::sniff;
use crate::error::IngestError;
use calamine::{open_workbook_auto_from_rs, Reader};
use pricewatch_domain::{RecordSet, Value};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// The Ingestor turns raw uploaded bytes into a typed [`RecordSet`]
#[derive(Debug, Clone)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    /// Create an Ingestor, rejecting an invalid configuration
    pub fn new(config: IngestConfig) -> Result<Self, IngestError> {
        config.validate().map_err(IngestError::Config)?;
        Ok(Self { config })
    }

    /// Create an Ingestor with the default configuration
    pub fn default_config() -> Self {
        Self {
            config: IngestConfig::default(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Parse raw bytes into a record set
    pub fn ingest(&self, bytes: &[u8]) -> Result<RecordSet, IngestError> {
        if let Some(limit) = self.config.max_bytes {
            if bytes.len() > limit {
                return Err(IngestError::TooManyBytes {
                    limit,
                    actual: bytes.len(),
                });
            }
        }

        let records = match self.config.format {
            InputFormat::Csv => self.read_csv(bytes)?,
            InputFormat::Workbook => self.read_workbook(bytes)?,
            InputFormat::Auto => {
                let container = sniff(bytes);
                if !container.is_workbook() {
                    return Err(IngestError::UnsupportedFormat(
                        "input is neither a ZIP nor an OLE workbook".to_string(),
                    ));
                }
                debug!("Detected {:?} container", container);
                self.read_workbook(bytes)?
            }
        };

        info!(
            "Ingested {} rows x {} columns",
            records.len(),
            records.columns().len()
        );
        Ok(records)
    }

    /// Read and parse a file
    ///
    /// With [`InputFormat::Auto`], a `.csv` extension selects comma-separated
    /// text and a `.tsv` extension tab-separated text.
    pub fn ingest_path(&self, path: &Path) -> Result<RecordSet, IngestError> {
        let bytes = std::fs::read(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        if self.config.format == InputFormat::Auto {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase);
            let delimiter = match extension.as_deref() {
                Some("csv") => Some(self.config.csv_delimiter),
                Some("tsv") => Some('\t'),
                _ => None,
            };
            if let Some(delimiter) = delimiter {
                let config = IngestConfig {
                    format: InputFormat::Csv,
                    csv_delimiter: delimiter,
                    ..self.config.clone()
                };
                return Ingestor { config }.ingest(&bytes);
            }
        }

        self.ingest(&bytes)
    }

    fn read_workbook(&self, bytes: &[u8]) -> Result<RecordSet, IngestError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let range = match &self.config.sheet {
            SheetSelector::First => match workbook.worksheet_range_at(0) {
                Some(range) => range?,
                None => {
                    debug!("Workbook has no sheets");
                    return Ok(RecordSet::empty());
                }
            },
            SheetSelector::Named(name) => {
                if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
                    return Err(IngestError::SheetNotFound(name.clone()));
                }
                workbook.worksheet_range(name)?
            }
        };

        let mut rows = range.rows();
        let header = match rows.next() {
            Some(header) => header.iter().map(header_text).collect(),
            None => return Ok(RecordSet::empty()),
        };

        let mut table = TableBuilder::new(header, self.config.max_rows);
        for row in rows {
            table.push(row.iter().map(coerce_cell).collect())?;
        }
        Ok(table.finish())
    }

    fn read_csv(&self, bytes: &[u8]) -> Result<RecordSet, IngestError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.config.csv_delimiter as u8)
            .from_reader(bytes);

        let mut rows = reader.records();
        let header = match rows.next() {
            Some(header) => header?.iter().map(str::to_string).collect(),
            None => return Ok(RecordSet::empty()),
        };

        let mut table = TableBuilder::new(header, self.config.max_rows);
        for row in rows {
            let row = row?;
            table.push(row.iter().map(coerce_text).collect())?;
        }
        Ok(table.finish())
    }
}

/// Accumulates coerced rows under a fixed header
struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    max_rows: Option<usize>,
    dropped_cells: usize,
    skipped_rows: usize,
}

impl TableBuilder {
    fn new(header: Vec<String>, max_rows: Option<usize>) -> Self {
        Self {
            columns: unique_headers(header),
            rows: Vec::new(),
            max_rows,
            dropped_cells: 0,
            skipped_rows: 0,
        }
    }

    fn push(&mut self, mut row: Vec<Value>) -> Result<(), IngestError> {
        if row.iter().all(Value::is_empty) {
            self.skipped_rows += 1;
            return Ok(());
        }

        if row.len() > self.columns.len() {
            let surplus = row.split_off(self.columns.len());
            self.dropped_cells += surplus.iter().filter(|v| !v.is_empty()).count();
        }

        if let Some(limit) = self.max_rows {
            if self.rows.len() >= limit {
                return Err(IngestError::TooManyRows { limit });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    fn finish(self) -> RecordSet {
        if self.dropped_cells > 0 {
            warn!(
                "Dropped {} cells beyond the {} header columns",
                self.dropped_cells,
                self.columns.len()
            );
        }
        if self.skipped_rows > 0 {
            debug!("Skipped {} empty rows", self.skipped_rows);
        }
        RecordSet::from_rows(self.columns, self.rows)
    }
}

/// Make header names unique: blanks become `Unnamed: <index>`, repeats get `.<n>`
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            candidate
        })
        .collect()
}

/// Parse raw bytes with the default configuration
///
/// # Examples
///
/// ```
/// use pricewatch_ingest::{ingest, IngestError};
///
/// let err = ingest(b"not a workbook").unwrap_err();
/// assert!(matches!(err, IngestError::UnsupportedFormat(_)));
/// ```
pub fn ingest(bytes: &[u8]) -> Result<RecordSet, IngestError> {
    Ingestor::default_config().ingest(bytes)
}

/// Parse raw bytes with an explicit configuration
pub fn ingest_with(bytes: &[u8], config: &IngestConfig) -> Result<RecordSet, IngestError> {
    Ingestor::new(config.clone())?.ingest(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        unique_headers(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_unique_headers() {
        assert_eq!(headers(&["a", "b"]), vec!["a", "b"]);
        assert_eq!(headers(&["a", "a", "a"]), vec!["a", "a.1", "a.2"]);
        assert_eq!(headers(&["a", "", " "]), vec!["a", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(headers(&["a.1", "a", "a"]), vec!["a.1", "a", "a.2"]);
    }

    #[test]
    fn test_table_builder_skips_empty_rows_and_drops_surplus() {
        let mut table = TableBuilder::new(vec!["a".into(), "b".into()], None);
        table.push(vec![Value::Empty, Value::Empty]).unwrap();
        table
            .push(vec![Value::from("x"), Value::from(1.0), Value::from("extra")])
            .unwrap();
        table.push(vec![Value::from("y")]).unwrap();
        let records = table.finish();

        assert_eq!(records.len(), 2);
        assert_eq!(records.records()[0].values().len(), 2);
        assert_eq!(records.records()[1].get("b"), Some(&Value::Empty));
    }

    #[test]
    fn test_table_builder_row_cap() {
        let mut table = TableBuilder::new(vec!["a".into()], Some(1));
        table.push(vec![Value::from("x")]).unwrap();
        let err = table.push(vec![Value::from("y")]).unwrap_err();
        assert!(matches!(err, IngestError::TooManyRows { limit: 1 }));
    }
}
