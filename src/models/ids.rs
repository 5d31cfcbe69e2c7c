//! Expense identifiers
//!
//! Ids are small sequential integers so they can be typed on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a stored expense, unique within one expenses file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// The id handed out when a store is empty
    pub const FIRST: ExpenseId = ExpenseId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ExpenseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ExpenseId = "42".parse().unwrap();
        assert_eq!(id, ExpenseId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!("#7".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert!("abc".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_next() {
        assert_eq!(ExpenseId::FIRST.next(), ExpenseId::new(2));
    }

    #[test]
    fn test_serialization_is_plain_number() {
        let json = serde_json::to_string(&ExpenseId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
