//! Expense display formatting
//!
//! Renders expense lists as tables and single expenses as detail blocks.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Expense;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Description")]
    description: String,
}

impl ExpenseRow {
    fn new(position: usize, expense: &Expense, currency_symbol: &str) -> Self {
        Self {
            position,
            id: expense.id.to_string(),
            date: expense.date.format("%Y-%m-%d %H:%M").to_string(),
            amount: expense.amount.format_with_symbol(currency_symbol),
            category: expense.category.label(),
            description: truncate(&expense.description, DESCRIPTION_WIDTH),
        }
    }
}

/// Format expenses as a table.
///
/// Each expense is paired with its 1-based position in the full chronological
/// listing, which is what `delete --position` expects.
pub fn format_expense_table(expenses: &[(usize, &Expense)], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses
        .iter()
        .map(|(position, e)| ExpenseRow::new(*position, e, currency_symbol));

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     #{}\n", expense.id));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Description: {}\n", expense.description));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId, Money, NewExpense};
    use chrono::NaiveDate;

    fn expense(id: u64, description: &str) -> Expense {
        let date = NaiveDate::from_ymd_opt(2025, 10, 24)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let new = NewExpense::new(
            Money::from_cents(1250),
            Category::FoodAndDining,
            description,
            date,
        )
        .unwrap();
        Expense::from_new(ExpenseId::new(id), new)
    }

    #[test]
    fn test_format_expense_table() {
        let lunch = expense(7, "Lunch");
        let formatted = format_expense_table(&[(4, &lunch)], "$");

        assert!(formatted.contains("ID"));
        assert!(formatted.contains("Description"));
        assert!(formatted.contains("2025-10-24 14:30"));
        assert!(formatted.contains("$12.50"));
        assert!(formatted.contains("Food & Dining"));
        assert!(formatted.contains("Lunch"));
        assert!(formatted.contains(" 4 "));
    }

    #[test]
    fn test_long_descriptions_are_truncated() {
        let long = expense(1, &"x".repeat(80));
        let formatted = format_expense_table(&[(1, &long)], "$");
        assert!(formatted.contains("..."));
        assert!(!formatted.contains(&"x".repeat(41)));
    }

    #[test]
    fn test_format_empty_table() {
        assert!(format_expense_table(&[], "$").contains("No expenses found"));
    }

    #[test]
    fn test_format_expense_details() {
        let formatted = format_expense_details(&expense(3, "Dinner"), "£");
        assert!(formatted.contains("#3"));
        assert!(formatted.contains("£12.50"));
        assert!(formatted.contains("Dinner"));
    }
}
