//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use pricewatch_domain::{ColumnSummary, ProjectedRow};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether status lines should accompany the output.
    ///
    /// JSON and quiet output stay machine-readable, so only tables get them.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Format projected rows under the given column headers.
    pub fn format_rows(&self, columns: &[String], rows: &[ProjectedRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Table => Ok(self.format_rows_table(columns, rows)),
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|row| row.label.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format rows as a table; staleness rows get a trailing age column.
    fn format_rows_table(&self, columns: &[String], rows: &[ProjectedRow]) -> String {
        if rows.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let with_age = rows.iter().any(|row| row.age_days.is_some());

        let mut builder = Builder::default();
        let mut header: Vec<String> = columns.to_vec();
        if with_age {
            header.push("Age (days)".to_string());
        }
        builder.push_record(header);

        for row in rows {
            let mut record: Vec<String> = columns
                .iter()
                .map(|column| row.get(column).unwrap_or_default().to_string())
                .collect();
            if with_age {
                record.push(row.age_days.map(|age| age.to_string()).unwrap_or_default());
            }
            builder.push_record(record);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format summary statistics.
    pub fn format_summary(&self, summary: &[ColumnSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(summary
                .iter()
                .map(|s| s.column.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if summary.is_empty() {
                    return Ok(self.colorize("No numeric columns found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"]);
                for s in summary {
                    builder.push_record([
                        s.column.clone(),
                        s.count.to_string(),
                        stat(s.mean),
                        s.std.map(stat).unwrap_or_default(),
                        stat(s.min),
                        stat(s.q1),
                        stat(s.median),
                        stat(s.q3),
                        stat(s.max),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a price series: one row per dated point of `value_column`.
    pub fn format_history(&self, value_column: &str, rows: &[ProjectedRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|row| format!("{}\t{}", point_date(row), row.get(value_column).unwrap_or_default()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if rows.is_empty() {
                    return Ok(self.colorize("No price points in this window.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Date", value_column, "Material"]);
                for row in rows {
                    builder.push_record([
                        point_date(row),
                        row.get(value_column).unwrap_or_default().to_string(),
                        row.label.clone(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a list of column names.
    pub fn format_columns(&self, columns: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(columns)?),
            _ => Ok(columns.join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn stat(value: f64) -> String {
    format!("{:.2}", value)
}

fn point_date(row: &ProjectedRow) -> String {
    row.effective_date.map(|d| d.to_string()).unwrap_or_default()
}
