//! Pricewatch CLI - find stale material prices in spreadsheet price lists.

use anyhow::Context;
use clap::Parser;
use pricewatch_cli::commands;
use pricewatch_cli::repl;
use pricewatch_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter)?,
        Command::Repl(args) => repl::run_repl(&args.file, &config, &formatter)
            .with_context(|| format!("REPL over {} failed", args.file.display()))?,
        cmd => {
            let profile = config.get_active_profile()?.clone();
            match cmd {
                Command::Show(args) => {
                    let file = args.file.clone();
                    commands::execute_show(args, &profile, &formatter)
                        .with_context(|| format!("Failed to show {}", file.display()))?
                }
                Command::Describe(args) => {
                    let file = args.file.clone();
                    commands::execute_describe(args, &profile, &formatter)
                        .with_context(|| format!("Failed to describe {}", file.display()))?
                }
                Command::Search(args) => {
                    let file = args.file.clone();
                    commands::execute_search(args, &profile, &formatter)
                        .with_context(|| format!("Failed to search {}", file.display()))?
                }
                Command::Stale(args) => {
                    let file = args.file.clone();
                    commands::execute_stale(args, &profile, &formatter)
                        .with_context(|| format!("Failed to analyze {}", file.display()))?
                }
                Command::History(args) => {
                    let file = args.file.clone();
                    commands::execute_history(args, &profile, &formatter)
                        .with_context(|| format!("Failed to chart {}", file.display()))?
                }
                Command::Profile(_) | Command::Repl(_) => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `PRICEWATCH_LOG` or else the `-v` count.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("PRICEWATCH_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
