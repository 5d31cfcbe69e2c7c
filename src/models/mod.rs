//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: the
//! expense record, its category set, money amounts and the validation rules
//! every new record must pass.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod validation;

pub use category::Category;
pub use expense::{Expense, NewExpense};
pub use ids::ExpenseId;
pub use money::Money;
pub use validation::{ExpenseInput, ValidationError};
