//! Report CLI command

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::reports::SummaryReport;
use crate::services::ExpenseStore;

/// Handle the report command
///
/// With `all`, categories without expenses are listed with a zero total.
pub fn handle_report_command(
    store: &ExpenseStore,
    settings: &Settings,
    all: bool,
) -> ExpenseResult<()> {
    let report = SummaryReport::generate(store);
    print!("{}", report.format_terminal(all, &settings.currency_symbol));
    Ok(())
}
