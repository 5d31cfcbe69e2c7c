//! Expense repository for JSON storage
//!
//! Manages loading and saving the expense collection to `expenses.json`.
//! The file is a plain JSON array of records.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ExpenseResult;
use crate::models::expense::stored_date;
use crate::models::{Category, Expense, ExpenseId, Money};

use super::file_io::{preserve_corrupt, read_json, write_json_atomic};
use super::ExpenseBackend;

/// A record as it may appear on disk.
///
/// Files written by the older day-precision CLI carry no `id`; those records
/// get fresh ids on load.
#[derive(Debug, Deserialize)]
struct StoredExpense {
    #[serde(default)]
    id: Option<ExpenseId>,
    amount: Money,
    category: Category,
    description: String,
    #[serde(with = "stored_date")]
    date: NaiveDateTime,
}

/// JSON file backend for the expense collection
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    path: PathBuf,
}

impl ExpenseRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection, surfacing read and parse failures
    pub fn try_load(&self) -> ExpenseResult<Vec<Expense>> {
        let stored: Vec<StoredExpense> = read_json(&self.path)?.unwrap_or_default();
        Ok(normalize(stored))
    }
}

impl ExpenseBackend for ExpenseRepository {
    fn load(&self) -> Vec<Expense> {
        match self.try_load() {
            Ok(expenses) => {
                debug!(path = %self.path.display(), count = expenses.len(), "loaded expenses");
                expenses
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "expenses file unreadable, starting empty");
                if self.path.is_file() {
                    match preserve_corrupt(&self.path) {
                        Ok(copy) => warn!(copy = %copy.display(), "kept a copy of the unreadable file"),
                        Err(e) => warn!(error = %e, "could not keep a copy of the unreadable file"),
                    }
                }
                Vec::new()
            }
        }
    }

    fn save(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        write_json_atomic(&self.path, expenses)?;
        debug!(path = %self.path.display(), count = expenses.len(), "saved expenses");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Drop records that break the field invariants and give every remaining
/// record a unique positive id, keeping file order.
fn normalize(stored: Vec<StoredExpense>) -> Vec<Expense> {
    let mut seen = HashSet::new();
    let mut max_id = stored
        .iter()
        .filter_map(|s| s.id)
        .max()
        .unwrap_or_default();

    let mut expenses = Vec::with_capacity(stored.len());
    for (position, record) in stored.into_iter().enumerate() {
        let id = match record.id {
            Some(id) if id.value() > 0 && seen.insert(id) => id,
            original => {
                max_id = max_id.next();
                seen.insert(max_id);
                debug!(position, ?original, assigned = %max_id, "assigned id to stored record");
                max_id
            }
        };

        let expense = Expense {
            id,
            amount: record.amount,
            category: record.category,
            description: record.description.trim().to_string(),
            date: record.date,
        };

        match expense.validate() {
            Ok(()) => expenses.push(expense),
            Err(e) => warn!(position, error = %e, "skipping invalid stored record"),
        }
    }
    expenses
}
