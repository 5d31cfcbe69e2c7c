//! Expense model
//!
//! A [`NewExpense`] is a record whose fields have passed validation but which
//! has no id yet. The store turns it into an [`Expense`] by assigning the next
//! sequential id.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use super::validation::{check_amount, check_description, to_minute, ValidationError};

/// A validated expense that has not been added to a store yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub category: Category,
    pub description: String,
    pub date: NaiveDateTime,
}

impl NewExpense {
    /// Build a new expense from typed values, enforcing the amount and
    /// description rules. The date is cut to the minute.
    pub fn new(
        amount: Money,
        category: Category,
        description: impl AsRef<str>,
        date: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: check_amount(amount)?,
            category,
            description: check_description(description.as_ref())?,
            date: to_minute(date),
        })
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Always positive
    pub amount: Money,

    pub category: Category,

    /// Never empty
    pub description: String,

    #[serde(with = "stored_date")]
    pub date: NaiveDateTime,
}

impl Expense {
    pub fn from_new(id: ExpenseId, new: NewExpense) -> Self {
        Self {
            id,
            amount: new.amount,
            category: new.category,
            description: new.description,
            date: new.date,
        }
    }

    /// Re-check the field invariants, e.g. on a record read from a hand-edited file
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_amount(self.amount)?;
        check_description(&self.description)?;
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} ({})",
            self.id,
            self.date.format("%Y-%m-%d %H:%M"),
            self.amount,
            self.description,
            self.category
        )
    }
}

/// On-disk date representation.
///
/// Dates are written as ISO-8601 `YYYY-MM-DDTHH:MM:SS`. Reading also accepts
/// fractional seconds and the two entry formats, which older files written by
/// the day-precision CLI used.
pub mod stored_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::validation::parse_entry_date;

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }

    /// Parse any date form that may appear in an expenses file
    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        raw.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
            .or_else(|| parse_entry_date(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_new_expense_rules() {
        let when = date(2025, 10, 24, 12, 0);

        assert!(NewExpense::new(Money::from_cents(100), Category::Other, "x", when).is_ok());
        assert_eq!(
            NewExpense::new(Money::zero(), Category::Other, "x", when),
            Err(ValidationError::NonPositiveAmount(Money::zero()))
        );
        assert_eq!(
            NewExpense::new(Money::from_cents(100), Category::Other, " ", when),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_serialization_format() {
        let new = NewExpense::new(
            Money::from_cents(1050),
            Category::FoodAndDining,
            "Lunch",
            date(2025, 10, 24, 12, 30),
        )
        .unwrap();
        let expense = Expense::from_new(ExpenseId::new(1), new);

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["amount"], 10.5);
        assert_eq!(value["category"], "Food & Dining");
        assert_eq!(value["description"], "Lunch");
        assert_eq!(value["date"], "2025-10-24T12:30:00");

        let back: Expense = serde_json::from_value(value).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_stored_date_accepts_older_forms() {
        let expected = date(2025, 10, 24, 14, 30);
        assert_eq!(stored_date::parse("2025-10-24T14:30:00"), Some(expected));
        assert_eq!(stored_date::parse("2025-10-24 14:30"), Some(expected));
        assert_eq!(
            stored_date::parse("2025-10-24T14:30:00.123456").map(|d| d.format("%H:%M").to_string()),
            Some("14:30".to_string())
        );
        assert_eq!(
            stored_date::parse("2025-10-24"),
            Some(date(2025, 10, 24, 0, 0))
        );
        assert_eq!(stored_date::parse("24.10.2025"), None);
    }
}
