//! Summary Report
//!
//! Spending totals per category plus the grand total across the store.

use std::collections::BTreeMap;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::models::{Category, Money};
use crate::services::ExpenseStore;

const BAR_WIDTH: usize = 20;

/// One category line of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
    /// Share of the grand total, 0-100
    pub percentage: f64,
}

/// Summary Report
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// Per-category totals; categories without expenses are absent
    pub by_category: BTreeMap<Category, Money>,
    counts: BTreeMap<Category, usize>,
    /// Sum of every expense
    pub total: Money,
    /// Number of expenses
    pub count: usize,
}

impl SummaryReport {
    /// Generate the summary for everything in the store.
    ///
    /// Totals come from [`ExpenseStore::report`]; only the counts are worked
    /// out here.
    pub fn generate(store: &ExpenseStore) -> Self {
        let mut counts = BTreeMap::new();
        for expense in store.list() {
            *counts.entry(expense.category).or_insert(0) += 1;
        }
        Self::from_totals(store.report(), counts)
    }

    /// Build a summary from per-category totals and expense counts
    pub fn from_totals(
        by_category: BTreeMap<Category, Money>,
        counts: BTreeMap<Category, usize>,
    ) -> Self {
        Self {
            total: by_category.values().copied().sum(),
            count: counts.values().sum(),
            by_category,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Category lines in category order. With `include_empty` every category
    /// appears, zero totals included.
    pub fn rows(&self, include_empty: bool) -> Vec<CategoryTotal> {
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let total = self.by_category.get(&category).copied();
                if total.is_none() && !include_empty {
                    return None;
                }
                let total = total.unwrap_or_else(Money::zero);
                Some(CategoryTotal {
                    category,
                    total,
                    count: self.counts.get(&category).copied().unwrap_or(0),
                    percentage: self.share(total),
                })
            })
            .collect()
    }

    fn share(&self, amount: Money) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            amount.cents() as f64 / self.total.cents() as f64 * 100.0
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, include_empty: bool, currency_symbol: &str) -> String {
        if self.is_empty() && !include_empty {
            return "No expenses recorded.\n".to_string();
        }

        let rows = self.rows(include_empty);
        let max = rows
            .iter()
            .map(|r| r.total.cents())
            .max()
            .unwrap_or(0) as f64;

        let mut output = String::new();
        output.push_str("Expense Summary\n");
        output.push_str(&separator(76));
        output.push('\n');
        output.push_str(&format!(
            "{:<26} {:>12} {:>6} {:>6}  {}\n",
            "Category", "Amount", "Count", "%", ""
        ));
        output.push_str(&separator(76));
        output.push('\n');

        for row in &rows {
            output.push_str(&format!(
                "{:<26} {:>12} {:>6} {:>6}  {}\n",
                row.category.label(),
                row.total.format_with_symbol(currency_symbol),
                row.count,
                format_percentage(row.percentage),
                format_bar(row.total.cents() as f64, max, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(76));
        output.push('\n');
        output.push_str(&format!(
            "{:<26} {:>12} {:>6}\n",
            "Total",
            self.total.format_with_symbol(currency_symbol),
            self.count
        ));

        output
    }
}
