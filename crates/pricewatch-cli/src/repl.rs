//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The session loads one spreadsheet and keeps it for its whole lifetime;
//! every command reads that set without changing it.

use crate::commands::{self, describe, history, search, show, stale};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::NaiveDate;
use pricewatch_domain::{Focus, RecordSet};
use pricewatch_search::SearchEngine;
use pricewatch_staleness::Analyzer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Run the interactive REPL over one spreadsheet.
pub fn run_repl(file: &Path, config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?.clone();
    let records = commands::load_records(file, &profile.ingest_config())?;
    let mut session = Session::new(records, profile, commands::today())?;

    println!(
        "{}",
        formatter.info(&format!(
            "Loaded {} rows from {} - Type 'help' for commands, 'exit' to quit",
            session.records.len(),
            file.display()
        ))
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("pricewatch> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(cmd) => match session.execute(cmd, formatter) {
                        Ok(output) => println!("{}", output),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    debug!("{}", session.analyzer.metrics().summary());
    editor.save_history(&history_path).ok();
    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Show every row, or the first N
    Show(Option<usize>),
    /// Summary statistics
    Describe,
    /// Search all columns (or the profile's search columns)
    Search(String),
    /// Staleness report, optionally with another threshold
    Stale(Option<u32>),
    /// Restrict stale and history output to one material
    Focus(Focus),
    /// Price history over the last N days
    History(Option<u32>),
    /// List column names
    Columns,
    /// Show help
    Help,
    /// Leave the REPL
    Exit,
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "show" => Ok(ReplCommand::Show(parse_optional(rest, "show [rows]")?)),
        "describe" => Ok(ReplCommand::Describe),
        "search" => Ok(ReplCommand::Search(rest.to_string())),
        "stale" => Ok(ReplCommand::Stale(parse_optional(rest, "stale [days]")?)),
        "focus" => Ok(ReplCommand::Focus(Focus::from_selector(rest))),
        "history" => Ok(ReplCommand::History(parse_optional(rest, "history [days]")?)),
        "columns" => Ok(ReplCommand::Columns),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            name
        ))),
    }
}

fn parse_optional<T: std::str::FromStr>(arg: &str, usage: &str) -> Result<Option<T>> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| CliError::InvalidInput(format!("Usage: {}", usage)))
}

/// An open spreadsheet and the view settings applied to it.
pub struct Session {
    records: RecordSet,
    profile: Profile,
    focus: Focus,
    reference: NaiveDate,
    analyzer: Analyzer,
    engine: SearchEngine,
}

impl Session {
    /// Start a session over a loaded set, measuring ages from `reference`.
    pub fn new(records: RecordSet, profile: Profile, reference: NaiveDate) -> Result<Self> {
        let analyzer = Analyzer::new(profile.staleness_config())?;
        let engine = SearchEngine::new(profile.search_config())?;
        Ok(Self {
            records,
            profile,
            focus: Focus::All,
            reference,
            analyzer,
            engine,
        })
    }

    /// Run one command and return its output.
    pub fn execute(&mut self, cmd: ReplCommand, formatter: &Formatter) -> Result<String> {
        let labels = self.profile.labels();
        match cmd {
            ReplCommand::Show(limit) => show::render_show(&self.records, limit, &labels, formatter),
            ReplCommand::Describe => describe::render_describe(&self.records, formatter),
            ReplCommand::Search(query) => search::render_search(
                &self.records,
                &query,
                &self.engine.config().selection(),
                &self.engine,
                &labels,
                formatter,
            ),
            ReplCommand::Stale(days) => stale::render_stale(
                &mut self.analyzer,
                &self.records,
                days,
                self.reference,
                &self.focus,
                formatter,
            ),
            ReplCommand::Focus(focus) => {
                let message = match &focus {
                    Focus::All => "Showing all materials".to_string(),
                    Focus::Entity(key) => format!("Focused on '{}'", key),
                };
                self.focus = focus;
                Ok(formatter.success(&message))
            }
            ReplCommand::History(days) => {
                let value_column = self.profile.value_column.as_deref().ok_or_else(|| {
                    CliError::InvalidInput(
                        "Set a value column in the profile to chart history".to_string(),
                    )
                })?;
                let points = self.analyzer.history(
                    &self.records,
                    value_column,
                    days.unwrap_or(self.profile.history_days),
                    self.reference,
                )?;
                history::render_history(&points, value_column, &self.focus, &labels, formatter)
            }
            ReplCommand::Columns => formatter.format_columns(self.records.columns()),
            ReplCommand::Help | ReplCommand::Exit => Ok(String::new()),
        }
    }
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dir = home.join(".pricewatch");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  show [rows]             - Show the spreadsheet (all rows or the first N)");
    println!("  describe                - Summary statistics of numeric columns");
    println!("  search <term>           - Rows containing the term (case-insensitive)");
    println!("  stale [days]            - Materials not revised in over N days");
    println!("  focus <material|all>    - Restrict stale and history output");
    println!("  history [days]          - Price points over the last N days");
    println!("  columns                 - List column names");
    println!("  help, ?                 - Show this help");
    println!("  exit, quit, q           - Exit REPL");
    println!();
}
