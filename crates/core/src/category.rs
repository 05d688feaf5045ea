//! Category - the fixed set of expense categories

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Errors that can occur when parsing categories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Unknown category: {0}")]
    Unknown(String),
}

/// Expense category.
///
/// Categories arrive lower-cased from the submission boundary, so parsing is
/// exact (`"office_supplies"`, never `"Office Supplies"`).
///
/// # Example
/// ```
/// use claimflow_core::Category;
///
/// let meals: Category = "meals".parse().unwrap();
/// assert_eq!(meals, Category::Meals);
/// assert_eq!(Category::OfficeSupplies.to_string(), "office_supplies");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Travel,
    Meals,
    OfficeSupplies,
    Equipment,
    Software,
    Training,
    Other,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 7] = [
        Category::Travel,
        Category::Meals,
        Category::OfficeSupplies,
        Category::Equipment,
        Category::Software,
        Category::Training,
        Category::Other,
    ];

    /// Parse a category, mapping strum's error into ours
    pub fn parse(s: &str) -> Result<Self, CategoryError> {
        s.parse()
            .map_err(|_| CategoryError::Unknown(s.to_string()))
    }

    /// Comma-separated list of valid category names
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for category in Category::ALL {
            let parsed = Category::parse(&category.to_string()).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = Category::parse("gadgets").unwrap_err();
        assert_eq!(err, CategoryError::Unknown("gadgets".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(Category::parse("Meals").is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Category::OfficeSupplies).unwrap();
        assert_eq!(json, "\"office_supplies\"");
    }

    #[test]
    fn test_names() {
        let names = Category::names();
        assert!(names.starts_with("travel, meals"));
        assert!(names.ends_with("other"));
    }
}
