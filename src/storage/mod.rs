//! Storage layer for the expense tracker
//!
//! The record store talks to persistence only through [`ExpenseBackend`].
//! [`ExpenseRepository`] is the JSON file implementation.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::error::ExpenseResult;
use crate::models::Expense;

/// Abstraction over durable storage of the full expense collection
pub trait ExpenseBackend {
    /// Read every stored record. A missing or unreadable source yields an
    /// empty collection rather than an error.
    fn load(&self) -> Vec<Expense>;

    /// Replace the stored collection with `expenses`
    fn save(&self, expenses: &[Expense]) -> ExpenseResult<()>;

    /// Human-readable description of where the data lives
    fn location(&self) -> String {
        String::from("<unknown>")
    }
}
