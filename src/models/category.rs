//! Expense categories
//!
//! The category set is closed: every expense belongs to exactly one of the
//! labels below. Validation, reporting and the CLI all go through this enum,
//! so adding a category only touches this file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::ValidationError;

/// Classification of an expense's purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Transportation,
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Utilities & Communication")]
    UtilitiesAndCommunication,
    #[serde(rename = "Healthcare & Insurance")]
    HealthcareAndInsurance,
    #[serde(rename = "Personal & Debt")]
    PersonalAndDebt,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 7] = [
        Self::Housing,
        Self::Transportation,
        Self::FoodAndDining,
        Self::UtilitiesAndCommunication,
        Self::HealthcareAndInsurance,
        Self::PersonalAndDebt,
        Self::Other,
    ];

    /// Get the label for this category, as stored on disk
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::FoodAndDining => "Food & Dining",
            Self::UtilitiesAndCommunication => "Utilities & Communication",
            Self::HealthcareAndInsurance => "Healthcare & Insurance",
            Self::PersonalAndDebt => "Personal & Debt",
            Self::Other => "Other",
        }
    }

    /// Look up a category by its exact label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Look up a category by its 1-based position in [`Category::ALL`]
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// 1-based position in [`Category::ALL`]
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map(|idx| idx + 1)
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}
