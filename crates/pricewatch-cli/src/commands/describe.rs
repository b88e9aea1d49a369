//! Describe command implementation.

use super::load_records;
use crate::cli::FileArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use pricewatch_domain::{describe, RecordSet};

/// Execute the describe command.
pub fn execute_describe(args: FileArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.file, &profile.ingest_config())?;
    println!("{}", render_describe(&records, formatter)?);
    Ok(())
}

/// Render summary statistics of the numeric columns.
pub fn render_describe(records: &RecordSet, formatter: &Formatter) -> Result<String> {
    formatter.format_summary(&describe(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use pricewatch_domain::Value;

    #[test]
    fn test_describe_json_lists_numeric_columns() {
        let records = RecordSet::from_rows(
            vec!["자재명".to_string(), "단가".to_string()],
            vec![
                vec![Value::from("Bolt-A"), Value::from(100.0)],
                vec![Value::from("Nut-B"), Value::from(300.0)],
            ],
        );
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = render_describe(&records, &formatter).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["column"], "단가");
        assert_eq!(parsed[0]["mean"], 200.0);
    }

    #[test]
    fn test_describe_without_numbers() {
        let records = RecordSet::from_rows(vec!["자재명".to_string()], vec![vec![Value::from("Bolt")]]);
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = render_describe(&records, &formatter).unwrap();
        assert!(output.contains("No numeric columns"));
    }
}
