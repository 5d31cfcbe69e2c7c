//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the record store.

pub mod category;
pub mod config;
pub mod expense;
pub mod import;
pub mod report;

pub use category::handle_categories_command;
pub use config::handle_config_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use import::handle_import_command;
pub use report::handle_report_command;

use crate::error::ExpenseError;

/// Tell the user a change was kept in memory but not written to disk
pub(crate) fn warn_unsaved(error: Option<&ExpenseError>) {
    if let Some(e) = error {
        eprintln!("Warning: the change could not be saved: {}", e);
    }
}
