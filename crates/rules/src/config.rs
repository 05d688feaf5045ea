//! Rule checker configuration

use claimflow_core::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Largest amount accepted at all
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,

    /// Minimum description length (characters)
    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,
}

/// Spending policy
///
/// Categories missing from a map have no rule of that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Hard ceiling per category; exceeding it rejects the claim
    #[serde(default = "default_hard_limits")]
    pub hard_limits: BTreeMap<Category, Decimal>,

    /// Receipt is mandatory above this amount
    #[serde(default = "default_receipt_required_above")]
    pub receipt_required_above: Decimal,

    /// Amounts above these need additional scrutiny (review, not rejection)
    #[serde(default = "default_scrutiny_thresholds")]
    pub scrutiny_thresholds: BTreeMap<Category, Decimal>,
}

fn default_max_amount() -> Decimal {
    Decimal::new(10_000, 0)
}

fn default_min_description_length() -> usize {
    3
}

fn default_hard_limits() -> BTreeMap<Category, Decimal> {
    BTreeMap::from([
        (Category::Travel, Decimal::new(5_000, 0)),
        (Category::Meals, Decimal::new(75, 0)),
        (Category::OfficeSupplies, Decimal::new(500, 0)),
        (Category::Equipment, Decimal::new(3_000, 0)),
        (Category::Software, Decimal::new(1_000, 0)),
        (Category::Training, Decimal::new(2_000, 0)),
        (Category::Other, Decimal::new(250, 0)),
    ])
}

fn default_receipt_required_above() -> Decimal {
    Decimal::new(25, 0)
}

fn default_scrutiny_thresholds() -> BTreeMap<Category, Decimal> {
    BTreeMap::from([
        (Category::Travel, Decimal::new(2_000, 0)),
        (Category::Meals, Decimal::new(50, 0)),
        (Category::OfficeSupplies, Decimal::new(250, 0)),
        (Category::Equipment, Decimal::new(1_000, 0)),
        (Category::Software, Decimal::new(500, 0)),
        (Category::Training, Decimal::new(1_000, 0)),
        (Category::Other, Decimal::new(100, 0)),
    ])
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_amount: default_max_amount(),
            min_description_length: default_min_description_length(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            hard_limits: default_hard_limits(),
            receipt_required_above: default_receipt_required_above(),
            scrutiny_thresholds: default_scrutiny_thresholds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = PolicyConfig::default();

        assert_eq!(config.hard_limits[&Category::Meals], Decimal::new(75, 0));
        assert_eq!(config.receipt_required_above, Decimal::new(25, 0));
        for category in Category::ALL {
            // scrutiny always sits below the hard ceiling
            assert!(config.scrutiny_thresholds[&category] < config.hard_limits[&category]);
        }
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "hard_limits": { "meals": "100" } }"#;
        let config: PolicyConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.hard_limits.len(), 1);
        assert_eq!(config.hard_limits[&Category::Meals], Decimal::new(100, 0));
        assert_eq!(config.receipt_required_above, Decimal::new(25, 0)); // default
    }

    #[test]
    fn test_default_validation() {
        let config = ValidationConfig::default();
        assert_eq!(config.max_amount, Decimal::new(10_000, 0));
        assert_eq!(config.min_description_length, 3);
    }
}
