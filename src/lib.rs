//! Expense Tracker - command-line personal expense tracking
//!
//! Records expenses (amount, category, description, date) in a JSON file,
//! lists them chronologically, deletes by id, imports batches from JSON or
//! CSV and reports totals per category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense record, categories, money and validation rules
//! - `storage`: Backend trait and the JSON file backend
//! - `services`: Record store and bulk import
//! - `reports`: Category summary
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::models::ExpenseInput;
//! use expense_tracker::services::ExpenseStore;
//! use expense_tracker::storage::ExpenseRepository;
//!
//! let mut store = ExpenseStore::open(ExpenseRepository::new("expenses.json"));
//! let outcome = store.add(&ExpenseInput::new("12.50", "Food & Dining", "Lunch"))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
