//! Expense CLI commands
//!
//! Implements the add, list, delete and save commands on top of the record
//! store.

use clap::Subcommand;

use super::category::{category_argument, resolve_category};
use super::warn_unsaved;
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, ExpenseInput};
use crate::services::{ExpenseFilter, ExpenseStore};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount (e.g., "12.50"); must be positive
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category label (e.g., "Food & Dining") or number from `categories`
        category: String,
        /// What the money was spent on
        description: String,
        /// Date as YYYY-MM-DD or "YYYY-MM-DD HH:MM", defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses, oldest first
    List {
        /// Filter by category label or number
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), inclusive
        #[arg(long)]
        to: Option<String>,
        /// Show only the most recent N matching expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete an expense by ID or by its position in `list`
    Delete {
        /// Expense ID
        #[arg(required_unless_present = "position")]
        id: Option<String>,
        /// 1-based position in the full chronological listing
        #[arg(short, long, conflicts_with = "id")]
        position: Option<usize>,
    },

    /// Rewrite the expenses file from the loaded records
    Save,
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let mut input = ExpenseInput::new(amount, category_argument(&category), description);
            if let Some(date) = date {
                input = input.with_date(date);
            }

            let outcome = store.add(&input)?;
            warn_unsaved(outcome.persist_error.as_ref());

            println!("Added expense:");
            print!("{}", format_expense_details(&outcome.value, symbol));
        }

        ExpenseCommands::List {
            category,
            from,
            to,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(category) = category {
                filter = filter.category(resolve_category(&category)?);
            }
            if let Some(from) = from {
                filter = filter.since(&from)?;
            }
            if let Some(to) = to {
                filter = filter.until(&to)?;
            }

            let mut rows: Vec<_> = store
                .list()
                .into_iter()
                .enumerate()
                .map(|(idx, e)| (idx + 1, e))
                .filter(|(_, e)| filter.matches(e))
                .collect();

            let total_matching = rows.len();
            if let Some(limit) = limit.or(settings.default_list_limit) {
                rows.drain(..total_matching.saturating_sub(limit));
            }

            print!("{}", format_expense_table(&rows, symbol));
            if rows.len() < total_matching {
                println!("Showing {} of {} expenses", rows.len(), total_matching);
            }
        }

        ExpenseCommands::Delete { id, position } => {
            let id = match (id, position) {
                (_, Some(position)) => store.id_at_position(position).ok_or_else(|| {
                    ExpenseError::expense_not_found(format!("position {}", position))
                })?,
                (Some(raw), None) => raw
                    .parse::<ExpenseId>()
                    .map_err(|_| ExpenseError::expense_not_found(raw.trim()))?,
                (None, None) => {
                    return Err(ExpenseError::Config(
                        "Give an expense ID or --position".into(),
                    ))
                }
            };

            let outcome = store.delete(id);
            warn_unsaved(outcome.persist_error.as_ref());

            let removed = outcome
                .value
                .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
            println!("Deleted expense #{}: {}", removed.id, removed.description);
        }

        ExpenseCommands::Save => {
            store.save()?;
            println!("Saved {} expenses to {}", store.len(), store.location());
        }
    }

    Ok(())
}
