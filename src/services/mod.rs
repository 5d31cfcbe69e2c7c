//! Service layer for the expense tracker
//!
//! The record store owns the expense collection and talks to storage through
//! the backend trait. Bulk import turns external documents into validated
//! records without touching the store.

pub mod expense;
pub mod import;

pub use expense::{ExpenseFilter, ExpenseStore, StoreOutcome};
pub use import::{import_file, ImportFormat, ImportReport, SkipReason, SkippedRecord};
