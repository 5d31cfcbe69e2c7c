//! Category CLI helpers
//!
//! Categories may be typed either as their exact label or as the number shown
//! by `expense categories`.

use crate::error::ExpenseResult;
use crate::models::validation::parse_category;
use crate::models::Category;

/// Turn a command-line category argument into the label validation expects.
///
/// A number in range becomes that category's label; anything else passes
/// through unchanged so validation can report it.
pub fn category_argument(raw: &str) -> String {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(Category::from_number)
        .map_or_else(|| raw.to_string(), |c| c.label().to_string())
}

/// Resolve a category argument used as a filter
pub fn resolve_category(raw: &str) -> ExpenseResult<Category> {
    Ok(parse_category(&category_argument(raw))?)
}

/// Handle the categories command
pub fn handle_categories_command() -> ExpenseResult<()> {
    println!("Categories:");
    for category in Category::ALL {
        println!("  {}. {}", category.number(), category);
    }
    Ok(())
}
