//! Config CLI command
//!
//! Shows where the tracker keeps its files and which settings are in effect.

use std::path::Path;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;

/// Handle the config command. With `init`, write the current settings to
/// `config.json` unless the file already exists.
pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &Settings,
    expenses_file: &Path,
    init: bool,
) -> ExpenseResult<()> {
    if init {
        if paths.settings_file().exists() {
            println!(
                "Settings file already exists: {}",
                paths.settings_file().display()
            );
        } else {
            settings.save(paths)?;
            println!("Wrote settings to {}", paths.settings_file().display());
        }
        println!();
    }

    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Expenses file:  {}", expenses_file.display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:    {}", settings.currency_symbol);
    match settings.default_list_limit {
        Some(limit) => println!("  Default list limit: {}", limit),
        None => println!("  Default list limit: (none)"),
    }

    Ok(())
}
