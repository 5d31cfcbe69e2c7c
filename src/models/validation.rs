//! Field validation shared by every path that creates expenses
//!
//! Adding an expense from the command line and importing one from a file go
//! through the same rules, applied in the same order: category, amount,
//! description, date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

use super::category::Category;
use super::expense::NewExpense;
use super::money::Money;

/// Date-only entry format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-with-time entry format (minute precision)
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Largest amount a single expense may have (one billion currency units).
/// Keeps any realistic number of expenses summable in cents.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// A single expense field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownCategory(String),
    InvalidAmount(String),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
    InvalidDate(String),
    MissingField(&'static str),
}

impl ValidationError {
    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnknownCategory(_) => "category",
            Self::InvalidAmount(_) | Self::NonPositiveAmount(_) | Self::AmountTooLarge(_) => {
                "amount"
            }
            Self::EmptyDescription => "description",
            Self::InvalidDate(_) => "date",
            Self::MissingField(field) => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(name) => write!(f, "Category '{}' is not supported", name),
            Self::InvalidAmount(raw) => write!(f, "Amount '{}' is not a number", raw),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::InvalidDate(raw) => write!(
                f,
                "Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DD HH:MM",
                raw
            ),
            Self::MissingField(field) => write!(f, "Missing field '{}'", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Resolve a category label. Labels must match exactly.
pub fn parse_category(raw: &str) -> Result<Category, ValidationError> {
    Category::from_label(raw).ok_or_else(|| ValidationError::UnknownCategory(raw.to_string()))
}

/// Parse an amount and require it to be strictly positive
pub fn parse_amount(raw: &str) -> Result<Money, ValidationError> {
    let amount =
        Money::parse(raw).map_err(|_| ValidationError::InvalidAmount(raw.trim().to_string()))?;
    check_amount(amount)
}

pub fn check_amount(amount: Money) -> Result<Money, ValidationError> {
    if !amount.is_positive() {
        Err(ValidationError::NonPositiveAmount(amount))
    } else if amount > MAX_AMOUNT {
        Err(ValidationError::AmountTooLarge(amount))
    } else {
        Ok(amount)
    }
}

/// Trim a description and reject it if nothing is left
pub fn check_description(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyDescription)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a user-entered date: `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM`
pub fn parse_entry_date(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Drop seconds and sub-second digits; entry dates have minute precision
pub fn to_minute(date: NaiveDateTime) -> NaiveDateTime {
    date.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date)
}

/// Unvalidated expense fields as typed by a user or read from an import file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseInput {
    pub amount: String,
    pub category: String,
    pub description: String,
    /// `None` means "now"
    pub date: Option<String>,
}

impl ExpenseInput {
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Validate every field, stopping at the first failure.
    ///
    /// `now`, cut to the minute, is used when no date was supplied.
    pub fn validate(&self, now: NaiveDateTime) -> Result<NewExpense, ValidationError> {
        let category = parse_category(&self.category)?;
        let amount = parse_amount(&self.amount)?;
        let description = check_description(&self.description)?;
        let date = match &self.date {
            Some(raw) => parse_entry_date(raw)?,
            None => to_minute(now),
        };

        Ok(NewExpense {
            amount,
            category,
            description,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 24)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_entry_date_formats() {
        let date_only = parse_entry_date("2025-10-24").unwrap();
        assert_eq!(date_only.to_string(), "2025-10-24 00:00:00");

        let with_time = parse_entry_date("2025-10-24 14:30").unwrap();
        assert_eq!(with_time.to_string(), "2025-10-24 14:30:00");
    }

    #[test]
    fn test_entry_date_rejects_other_forms() {
        for raw in [
            "",
            "24/10/2025",
            "2025-10-24T14:30",
            "2025-10-24 14:30:00",
            "2025-13-01",
            "2025-02-30",
            "yesterday",
        ] {
            assert!(
                matches!(parse_entry_date(raw), Err(ValidationError::InvalidDate(_))),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert_eq!(
            parse_amount("0"),
            Err(ValidationError::NonPositiveAmount(Money::zero()))
        );
        assert_eq!(
            parse_amount("-5"),
            Err(ValidationError::NonPositiveAmount(Money::from_cents(-500)))
        );
        assert_eq!(
            parse_amount("ten"),
            Err(ValidationError::InvalidAmount("ten".into()))
        );
    }

    #[test]
    fn test_amount_upper_bound() {
        assert_eq!(parse_amount("1000000000").unwrap(), MAX_AMOUNT);
        assert_eq!(
            parse_amount("1000000000.01"),
            Err(ValidationError::AmountTooLarge(Money::from_cents(100_000_000_001)))
        );
        assert!(matches!(
            parse_amount("50000000000000000"),
            Err(ValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_validate_full_input() {
        let input = ExpenseInput::new("10", "Food & Dining", "  Lunch ").with_date("2025-10-20");
        let expense = input.validate(now()).unwrap();

        assert_eq!(expense.amount, Money::from_cents(1000));
        assert_eq!(expense.category, Category::FoodAndDining);
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.date.to_string(), "2025-10-20 00:00:00");
    }

    #[test]
    fn test_missing_date_defaults_to_now() {
        let input = ExpenseInput::new("3.20", "Transportation", "Bus");
        assert_eq!(input.validate(now()).unwrap().date, now());
    }

    #[test]
    fn test_missing_date_is_cut_to_the_minute() {
        let precise = NaiveDate::from_ymd_opt(2025, 10, 24)
            .unwrap()
            .and_hms_nano_opt(9, 15, 42, 174_285_801)
            .unwrap();

        let input = ExpenseInput::new("3.20", "Transportation", "Bus");
        assert_eq!(input.validate(precise).unwrap().date, now());
        assert_eq!(to_minute(now()), now());
    }

    #[test]
    fn test_category_labels_match_exactly() {
        assert_eq!(parse_category("Housing").unwrap(), Category::Housing);
        for raw in [" Housing ", "housing", "Food and Dining", ""] {
            assert_eq!(
                parse_category(raw),
                Err(ValidationError::UnknownCategory(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_validation_order() {
        // Category is checked before amount, amount before description
        let everything_wrong = ExpenseInput::new("-1", "Nope", "").with_date("bad");
        assert_eq!(everything_wrong.validate(now()).unwrap_err().field(), "category");

        let bad_amount = ExpenseInput::new("-1", "Other", "").with_date("bad");
        assert_eq!(bad_amount.validate(now()).unwrap_err().field(), "amount");

        let bad_description = ExpenseInput::new("1", "Other", "   ").with_date("bad");
        assert_eq!(
            bad_description.validate(now()).unwrap_err(),
            ValidationError::EmptyDescription
        );

        let bad_date = ExpenseInput::new("1", "Other", "x").with_date("bad");
        assert_eq!(bad_date.validate(now()).unwrap_err().field(), "date");
    }
}
