//! Expense store
//!
//! Owns the in-memory expense collection: validates and adds records, assigns
//! ids, deletes, lists in chronological order and aggregates by category.
//! Every add or delete is followed by a full save through the backend.
//!
//! A failed save does not undo the in-memory change. The in-memory collection
//! stays authoritative for the rest of the session and the write error is
//! handed back to the caller in [`StoreOutcome::persist_error`].

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::validation::{parse_entry_date, DATE_FORMAT};
use crate::models::{Category, Expense, ExpenseId, ExpenseInput, Money, NewExpense};
use crate::storage::ExpenseBackend;

/// Result of a mutation that was applied in memory and then persisted
#[derive(Debug)]
#[must_use]
pub struct StoreOutcome<T> {
    pub value: T,
    /// Set when the full-collection save after the mutation failed
    pub persist_error: Option<ExpenseError>,
}

impl<T> StoreOutcome<T> {
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Inclusive lower bound
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound
    pub end: Option<NaiveDateTime>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set the lower bound from an entry-format string. A bare date means the
    /// start of that day.
    pub fn since(mut self, raw: &str) -> ExpenseResult<Self> {
        self.start = Some(parse_entry_date(raw)?);
        Ok(self)
    }

    /// Set the upper bound from an entry-format string. A bare date means the
    /// end of that day, so every expense on it is included.
    pub fn until(mut self, raw: &str) -> ExpenseResult<Self> {
        let end = match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => date.and_time(end_of_day()),
            Err(_) => parse_entry_date(raw)?,
        };
        self.end = Some(end);
        Ok(self)
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.map_or(true, |c| expense.category == c)
            && self.start.map_or(true, |start| expense.date >= start)
            && self.end.map_or(true, |end| expense.date <= end)
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// The record store
pub struct ExpenseStore {
    backend: Box<dyn ExpenseBackend>,
    expenses: Vec<Expense>,
    next_id: ExpenseId,
}

impl ExpenseStore {
    /// Load every record from the backend. Never fails: an absent or
    /// unreadable source gives an empty store.
    pub fn open(backend: impl ExpenseBackend + 'static) -> Self {
        let expenses = backend.load();
        let next_id = next_id_after(&expenses);
        info!(
            location = %backend.location(),
            count = expenses.len(),
            %next_id,
            "opened expense store"
        );
        Self {
            backend: Box::new(backend),
            expenses,
            next_id,
        }
    }

    /// Validate raw fields and add the expense
    ///
    /// A missing date means the current local time. On a validation failure
    /// nothing changes and the error names the offending field.
    pub fn add(&mut self, input: &ExpenseInput) -> ExpenseResult<StoreOutcome<Expense>> {
        let new = input.validate(Local::now().naive_local())?;
        Ok(self.insert(new))
    }

    /// Add an already-validated expense, assign it the next id and save
    pub fn insert(&mut self, new: NewExpense) -> StoreOutcome<Expense> {
        let expense = self.push(new);
        debug!(id = %expense.id, amount = %expense.amount, category = %expense.category, "added expense");
        let persist_error = self.persist();
        StoreOutcome {
            value: expense,
            persist_error,
        }
    }

    /// Append imported expenses without saving
    ///
    /// Ids are assigned in order. Call [`ExpenseStore::save`] to persist.
    pub fn merge(&mut self, imported: Vec<NewExpense>) -> Vec<Expense> {
        let merged: Vec<Expense> = imported.into_iter().map(|new| self.push(new)).collect();
        debug!(count = merged.len(), "merged imported expenses");
        merged
    }

    fn push(&mut self, new: NewExpense) -> Expense {
        let expense = Expense::from_new(self.next_id, new);
        self.next_id = self.next_id.next();
        self.expenses.push(expense.clone());
        expense
    }

    /// All expenses, oldest first. Expenses with the same date keep the order
    /// in which they were added.
    pub fn list(&self) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = self.expenses.iter().collect();
        sorted.sort_by_key(|e| e.date);
        sorted
    }

    /// Expenses matching a filter, oldest first
    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        self.list()
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Id of the expense at a 1-based position of [`ExpenseStore::list`]
    pub fn id_at_position(&self, position: usize) -> Option<ExpenseId> {
        position
            .checked_sub(1)
            .and_then(|idx| self.list().get(idx).map(|e| e.id))
    }

    /// Remove the expense with `id`
    ///
    /// Returns the removed expense, or `None` when no expense has that id, in
    /// which case nothing is saved.
    pub fn delete(&mut self, id: ExpenseId) -> StoreOutcome<Option<Expense>> {
        let Some(idx) = self.expenses.iter().position(|e| e.id == id) else {
            debug!(%id, "delete: no such expense");
            return StoreOutcome {
                value: None,
                persist_error: None,
            };
        };

        let removed = self.expenses.remove(idx);
        debug!(%id, "deleted expense");
        let persist_error = self.persist();
        StoreOutcome {
            value: Some(removed),
            persist_error,
        }
    }

    /// Total amount per category. Categories without expenses are absent.
    pub fn report(&self) -> BTreeMap<Category, Money> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category).or_insert_with(Money::zero) += expense.amount;
        }
        totals
    }

    /// Write the full collection to the backend
    pub fn save(&self) -> ExpenseResult<()> {
        self.backend.save(&self.expenses)
    }

    fn persist(&self) -> Option<ExpenseError> {
        match self.save() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "save failed, keeping in-memory changes");
                Some(e)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The id the next added expense will get
    pub fn next_id(&self) -> ExpenseId {
        self.next_id
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}

fn next_id_after(expenses: &[Expense]) -> ExpenseId {
    expenses
        .iter()
        .map(|e| e.id)
        .max()
        .map_or(ExpenseId::FIRST, |max| max.next())
}
