//! Search command implementation.

use super::load_records;
use crate::cli::SearchArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use pricewatch_domain::{project, Focus, LabelSpec, RecordSet};
use pricewatch_search::{ColumnSelection, SearchEngine};

/// Execute the search command.
pub fn execute_search(args: SearchArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.file, &profile.ingest_config())?;

    let mut config = profile.search_config();
    if let Some(limit) = args.limit {
        config = config.with_limit(limit);
    }
    let engine = SearchEngine::new(config)?;

    let columns = if args.columns.is_empty() {
        engine.config().selection()
    } else {
        ColumnSelection::from_names(args.columns)
    };

    println!(
        "{}",
        render_search(&records, &args.query, &columns, &engine, &profile.labels(), formatter)?
    );
    Ok(())
}

/// Render the rows matching `query`.
///
/// A blank query asks for a term instead of listing the whole set; zero hits
/// get their own message.
pub fn render_search(
    records: &RecordSet,
    query: &str,
    columns: &ColumnSelection,
    engine: &SearchEngine,
    labels: &LabelSpec,
    formatter: &Formatter,
) -> Result<String> {
    if query.trim().is_empty() {
        return Ok(formatter.info("Please enter a search term"));
    }

    let outcome = engine.search_columns(records, query, columns);
    let mut lines = Vec::new();

    for column in &outcome.skipped_columns {
        lines.push(formatter.warning(&format!("Column '{}' not found, skipped", column)));
    }

    if outcome.is_empty() {
        lines.push(formatter.warning(&format!("No rows match '{}'", query)));
        return Ok(lines.join("\n"));
    }

    let rows = project(outcome.records.records(), &Focus::All, labels);
    lines.push(formatter.format_rows(records.columns(), &rows)?);

    if formatter.is_table() {
        let status = if outcome.truncated() {
            format!(
                "Showing {} of {} matches in {} rows",
                outcome.records.len(),
                outcome.matched,
                outcome.scanned
            )
        } else {
            format!("{} of {} rows match", outcome.matched, outcome.scanned)
        };
        lines.push(formatter.info(&status));
    }

    Ok(lines.join("\n"))
}
