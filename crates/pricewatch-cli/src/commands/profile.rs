//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs, ProfileSetArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set(args) => set_profile(config, args, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}Entity column: {}", indent, profile.entity_column);
    println!("{}Date column: {}", indent, profile.date_column);
    println!("{}Threshold: {} days", indent, profile.threshold_days);
    if let Some(code) = &profile.code_column {
        println!("{}Code column: {}", indent, code);
    }
    if let Some(value) = &profile.value_column {
        println!("{}Value column: {}", indent, value);
    }
    if !profile.search_columns.is_empty() {
        println!("{}Search columns: {}", indent, profile.search_columns.join(", "));
    }
    println!("{}History window: {} days", indent, profile.history_days);
    if let Some(max_rows) = profile.max_rows {
        println!("{}Row cap: {}", indent, max_rows);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
    Ok(())
}

/// Create or update a profile.
///
/// A preset replaces the columns and threshold; other flags override single fields
/// of the existing profile (or of the defaults for a new one).
fn set_profile(config: &mut Config, args: ProfileSetArgs, formatter: &Formatter) -> Result<()> {
    let existing = config.profiles.get(&args.name).cloned();
    let action = if existing.is_some() { "Updated" } else { "Created" };

    let mut profile = existing.unwrap_or_default();
    if let Some(preset) = args.preset {
        let base = Profile::from_staleness(preset.into());
        profile.entity_column = base.entity_column;
        profile.date_column = base.date_column;
        profile.threshold_days = base.threshold_days;
        profile.code_column = base.code_column;
    }
    if let Some(column) = args.entity_column {
        profile.entity_column = column;
    }
    if let Some(column) = args.date_column {
        profile.date_column = column;
    }
    if let Some(days) = args.threshold_days {
        profile.threshold_days = days;
    }
    if let Some(column) = args.code_column {
        profile.code_column = Some(column);
    }
    if let Some(column) = args.value_column {
        profile.value_column = Some(column);
    }
    if !args.search_columns.is_empty() {
        profile.search_columns = args.search_columns;
    }
    if let Some(days) = args.history_days {
        profile.history_days = days;
    }
    if let Some(max_rows) = args.max_rows {
        profile.max_rows = Some(max_rows);
    }

    profile.staleness_config().validate().map_err(CliError::Config)?;
    profile.search_config().validate().map_err(CliError::Config)?;
    profile.ingest_config().validate().map_err(CliError::Config)?;

    config.set_profile(args.name.clone(), profile);
    config.save()?;

    println!("{}", formatter.success(&format!("{} profile '{}'", action, args.name)));

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
    } else {
        println!("{}", formatter.warning(&format!("Profile '{}' does not exist", name)));
    }

    Ok(())
}
