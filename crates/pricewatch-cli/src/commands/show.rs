//! Show command implementation.

use super::load_records;
use crate::cli::ShowArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use pricewatch_domain::{project, Focus, LabelSpec, RecordSet};

/// Execute the show command.
pub fn execute_show(args: ShowArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.file, &profile.ingest_config())?;
    println!("{}", render_show(&records, args.limit, &profile.labels(), formatter)?);
    Ok(())
}

/// Render every row of the set, or the first `limit` rows.
pub fn render_show(
    records: &RecordSet,
    limit: Option<usize>,
    labels: &LabelSpec,
    formatter: &Formatter,
) -> Result<String> {
    let view = match limit {
        Some(limit) => records.truncated(limit),
        None => records.clone(),
    };

    let rows = project(view.records(), &Focus::All, labels);
    let mut output = formatter.format_rows(records.columns(), &rows)?;

    if formatter.is_table() && view.len() < records.len() {
        output.push('\n');
        output.push_str(&formatter.info(&format!(
            "Showing {} of {} rows",
            view.len(),
            records.len()
        )));
    }

    Ok(output)
}
