//! CLI command handler for bulk import
//!
//! Reads a JSON or CSV file, reports every skipped record and merges the
//! accepted ones into the store.

use std::path::Path;

use super::warn_unsaved;
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{import_file, ExpenseStore, ImportReport};

const PREVIEW_ROWS: usize = 5;

/// Handle the import command
pub fn handle_import_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    file: &Path,
    dry_run: bool,
) -> ExpenseResult<()> {
    if !file.exists() {
        return Err(ExpenseError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let report = import_file(file)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Records read:   {}", report.total());
    println!("  Valid:          {}", report.accepted.len());
    println!("  Skipped:        {}", report.skipped.len());
    print_skipped(&report);

    if report.accepted.is_empty() {
        println!();
        println!("No valid expenses to import.");
        return Ok(());
    }

    if dry_run {
        print_preview(&report, &settings.currency_symbol);
        println!();
        println!("Dry run: nothing was imported.");
        return Ok(());
    }

    let merged = store.merge(report.accepted);
    warn_unsaved(store.save().err().as_ref());

    println!();
    println!("Imported {} expenses", merged.len());
    if let (Some(first), Some(last)) = (merged.first(), merged.last()) {
        println!("  Assigned IDs #{} to #{}", first.id, last.id);
    }

    Ok(())
}

fn print_skipped(report: &ImportReport) {
    for skipped in &report.skipped {
        println!("    Record {}: {}", skipped.position, skipped.reason);
    }
}

fn print_preview(report: &ImportReport, currency_symbol: &str) {
    println!();
    println!("First expenses to import:");
    for expense in report.accepted.iter().take(PREVIEW_ROWS) {
        println!(
            "  {} {:>10} {} ({})",
            expense.date.format("%Y-%m-%d %H:%M"),
            expense.amount.format_with_symbol(currency_symbol),
            expense.description,
            expense.category
        );
    }
    if report.accepted.len() > PREVIEW_ROWS {
        println!("  ... and {} more", report.accepted.len() - PREVIEW_ROWS);
    }
}
