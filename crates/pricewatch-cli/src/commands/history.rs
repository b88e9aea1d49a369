//! History command implementation.

use super::{load_records, today};
use crate::cli::HistoryArgs;
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use pricewatch_domain::{project, Focus, LabelSpec};
use pricewatch_staleness::{history, HistoryPoint};

/// Execute the history command.
pub fn execute_history(args: HistoryArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let value_column = args
        .value_column
        .or_else(|| profile.value_column.clone())
        .ok_or_else(|| {
            CliError::InvalidInput(
                "No value column: pass --value-column or set one in the profile".to_string(),
            )
        })?;
    let date_column = args.date_column.unwrap_or_else(|| profile.date_column.clone());
    let days = args.days.unwrap_or(profile.history_days);
    let reference = args.as_of.unwrap_or_else(today);
    let focus = args
        .focus
        .as_deref()
        .map(Focus::from_selector)
        .unwrap_or_default();

    let records = load_records(&args.file, &profile.ingest_config())?;
    let points = history(&records, &date_column, &value_column, days, reference)?;

    println!(
        "{}",
        render_history(&points, &value_column, &focus, &profile.labels(), formatter)?
    );
    Ok(())
}

/// Render a price series, oldest point first.
pub fn render_history(
    points: &[HistoryPoint],
    value_column: &str,
    focus: &Focus,
    labels: &LabelSpec,
    formatter: &Formatter,
) -> Result<String> {
    let rows = project(points, focus, labels);
    formatter.format_history(value_column, &rows)
}
