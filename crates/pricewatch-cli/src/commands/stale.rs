//! Stale command implementation.

use super::{load_records, today};
use crate::cli::StaleArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use chrono::NaiveDate;
use pricewatch_domain::{project, Focus, RecordSet};
use pricewatch_search::{search, ColumnSelection};
use pricewatch_staleness::Analyzer;
use tracing::info;

/// Execute the stale command.
pub fn execute_stale(args: StaleArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.file, &profile.ingest_config())?;

    let mut config = profile.staleness_config();
    if let Some(column) = args.entity_column {
        config.entity_column = column;
    }
    if let Some(column) = args.date_column {
        config.date_column = column;
    }
    if let Some(days) = args.threshold_days {
        config.threshold_days = days;
    }
    if let Some(column) = args.code_column {
        config.code_column = Some(column);
    }
    let mut analyzer = Analyzer::new(config)?;

    let scope = match args.query {
        Some(query) => {
            let columns = if args.columns.is_empty() {
                profile.search_config().selection()
            } else {
                ColumnSelection::from_names(args.columns)
            };
            search(&records, &query, &columns)
        }
        None => records,
    };

    let reference = args.as_of.unwrap_or_else(today);
    let focus = args
        .focus
        .as_deref()
        .map(Focus::from_selector)
        .unwrap_or_default();

    println!(
        "{}",
        render_stale(&mut analyzer, &scope, None, reference, &focus, formatter)?
    );
    info!("{}", analyzer.metrics().summary());
    Ok(())
}

/// Render materials not revised in over `threshold` days (default: configured).
pub fn render_stale(
    analyzer: &mut Analyzer,
    records: &RecordSet,
    threshold: Option<u32>,
    reference: NaiveDate,
    focus: &Focus,
    formatter: &Formatter,
) -> Result<String> {
    let threshold = threshold.unwrap_or(analyzer.config().threshold_days);
    let stale = analyzer.analyze_with_threshold(records, threshold, reference)?;
    let rows = project(&stale, focus, &analyzer.labels());

    if rows.is_empty() && formatter.is_table() {
        return Ok(formatter.success(&format!(
            "No prices older than {} days as of {}",
            threshold, reference
        )));
    }

    let mut output = formatter.format_rows(records.columns(), &rows)?;
    if formatter.is_table() {
        output.push('\n');
        output.push_str(&formatter.warning(&format!(
            "{} material(s) not revised in over {} days as of {}",
            rows.len(),
            threshold,
            reference
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use pricewatch_domain::Value;
    use pricewatch_staleness::StalenessConfig;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn records() -> RecordSet {
        RecordSet::from_rows(
            vec!["자재명".to_string(), "효력시작일".to_string()],
            vec![
                vec![Value::from("Bolt-A"), Value::from("2024-04-22")],
                vec![Value::from("Bolt-A"), Value::from("2024-05-22")],
                vec![Value::from("Nut-B"), Value::from("2024-01-01")],
                vec![Value::from("Washer"), Value::from("N/A")],
            ],
        )
    }

    #[test]
    fn test_stale_quiet_lists_oldest_first() {
        let mut analyzer = Analyzer::new(StalenessConfig::strict()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output =
            render_stale(&mut analyzer, &records(), None, reference(), &Focus::All, &formatter).unwrap();
        assert_eq!(output, "Nut-B\nBolt-A");
    }

    #[test]
    fn test_threshold_override() {
        let mut analyzer = Analyzer::new(StalenessConfig::strict()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output =
            render_stale(&mut analyzer, &records(), Some(90), reference(), &Focus::All, &formatter).unwrap();
        assert_eq!(output, "Nut-B");
    }

    #[test]
    fn test_focus_on_one_material() {
        let mut analyzer = Analyzer::new(StalenessConfig::strict()).unwrap();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let focus = Focus::Entity("Bolt-A".to_string());
        let output = render_stale(&mut analyzer, &records(), None, reference(), &focus, &formatter).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["age_days"], 40);
        assert_eq!(parsed[0]["effective_date"], "2024-04-22");
    }

    #[test]
    fn test_nothing_stale() {
        let mut analyzer = Analyzer::new(StalenessConfig::lenient()).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output =
            render_stale(&mut analyzer, &records(), None, reference(), &Focus::All, &formatter).unwrap();
        assert!(output.contains("No prices older than 180 days"));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let config = StalenessConfig::default().with_columns("name", "date");
        let mut analyzer = Analyzer::new(config).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = render_stale(&mut analyzer, &records(), None, reference(), &Focus::All, &formatter);
        assert!(result.is_err());
    }
}
