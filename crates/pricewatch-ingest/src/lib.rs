//! Pricewatch Ingestor
//!
//! Parses an uploaded tabular file into a typed [`RecordSet`](pricewatch_domain::RecordSet)
//! without assuming a fixed set of columns.
//!
//! # Overview
//!
//! The Ingestor is the entry point of every analysis. It accepts the raw bytes of
//! a spreadsheet workbook (xlsx, xlsm, xlsb, xls, ods) or, when asked to, of a
//! delimited text file, and produces a record set whose column names come
//! verbatim from the first row.
//!
//! # Architecture
//!
//! ```text
//! bytes → sniff → workbook / CSV reader → coerce cells → RecordSet
//! ```
//!
//! # Key Features
//!
//! - **Container detection**: ZIP and OLE magic bytes identify workbooks
//! - **Lossless coercion**: each cell becomes the most specific of date, number
//!   or text that parses without loss
//! - **Empty is not an error**: an empty sheet yields an empty record set
//! - **Caller-configured caps**: optional byte and row limits
//!
//! # Example Usage
//!
//! ```no_run
//! use pricewatch_ingest::{IngestConfig, Ingestor};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ingestor = Ingestor::new(IngestConfig::bounded())?;
//! let records = ingestor.ingest_path(Path::new("prices.xlsx"))?;
//!
//! println!("Columns: {:?}", records.columns());
//! println!("Rows: {}", records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod coerce;
mod config;
mod detect;
mod error;
mod ingestor;

pub use coerce::{coerce_cell, coerce_text};
pub use config::{IngestConfig, InputFormat, SheetSelector};
pub use detect::{sniff, Container};
pub use error::IngestError;
pub use ingestor::{ingest, ingest_with, Ingestor};
