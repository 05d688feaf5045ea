//! Risk scoring configuration
//!
//! Defaults are the curated production lists; any field can be overridden from
//! the JSON config file and missing fields fall back to these defaults.

use claimflow_core::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points contributed by each rule when it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPoints {
    #[serde(default = "default_round_amount_points")]
    pub round_amount: u32,
    #[serde(default = "default_threshold_gaming_points")]
    pub threshold_gaming: u32,
    #[serde(default = "default_keyword_points")]
    pub keyword: u32,
    #[serde(default = "default_too_short_points")]
    pub too_short: u32,
    #[serde(default = "default_generic_points")]
    pub generic: u32,
    #[serde(default = "default_no_evidence_points")]
    pub no_evidence: u32,
    #[serde(default = "default_above_typical_points")]
    pub above_typical: u32,
}

/// Configuration for the risk scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    // === Amount patterns ===
    /// Amounts that look made up when hit exactly
    #[serde(default = "default_round_amounts")]
    pub round_amounts: Vec<Decimal>,

    /// Tolerance for "exactly" a round amount
    #[serde(default = "default_round_epsilon")]
    pub round_epsilon: Decimal,

    /// Known approval/receipt thresholds that claimants try to stay under
    #[serde(default = "default_policy_thresholds")]
    pub policy_thresholds: Vec<Decimal>,

    /// How far below a threshold still counts as gaming it
    #[serde(default = "default_threshold_tolerance")]
    pub threshold_tolerance: Decimal,

    // === Description patterns ===
    /// Low-effort or test words (matched case-insensitively as substrings)
    #[serde(default = "default_suspicious_keywords")]
    pub suspicious_keywords: Vec<String>,

    /// Descriptions shorter than this are flagged
    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,

    /// Single generic words that are not a real description
    #[serde(default = "default_generic_descriptions")]
    pub generic_descriptions: Vec<String>,

    // === Evidence ===
    /// Above this amount a missing receipt is suspicious
    #[serde(default = "default_high_amount_floor")]
    pub high_amount_floor: Decimal,

    // === Category norms ===
    /// Typical spend per category
    #[serde(default = "default_typical_spend")]
    pub typical_spend: BTreeMap<Category, Decimal>,

    /// Amount above `typical × multiplier` is flagged
    #[serde(default = "default_typical_multiplier")]
    pub typical_multiplier: Decimal,

    // === Scoring ===
    #[serde(default)]
    pub points: RiskPoints,

    /// Score at or above this is MEDIUM
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: u8,

    /// Score at or above this is HIGH
    #[serde(default = "default_high_threshold")]
    pub high_threshold: u8,
}

fn default_round_amount_points() -> u32 {
    15
}

fn default_threshold_gaming_points() -> u32 {
    25
}

fn default_keyword_points() -> u32 {
    20
}

fn default_too_short_points() -> u32 {
    15
}

fn default_generic_points() -> u32 {
    15
}

fn default_no_evidence_points() -> u32 {
    20
}

fn default_above_typical_points() -> u32 {
    10
}

fn decimals(values: &[i64]) -> Vec<Decimal> {
    values.iter().map(|v| Decimal::new(*v, 0)).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_round_amounts() -> Vec<Decimal> {
    decimals(&[50, 100, 150, 200, 250, 300, 500, 750, 1000, 1500, 2000, 2500, 5000])
}

fn default_round_epsilon() -> Decimal {
    Decimal::new(1, 3) // 0.001
}

fn default_policy_thresholds() -> Vec<Decimal> {
    decimals(&[25, 50, 75, 100, 250, 500, 1000, 2500, 5000])
}

fn default_threshold_tolerance() -> Decimal {
    Decimal::new(100, 2) // 1.00
}

fn default_suspicious_keywords() -> Vec<String> {
    strings(&[
        "test",
        "asdf",
        "dummy",
        "sample",
        "xxx",
        "lorem",
        "placeholder",
        "tbd",
        "n/a",
    ])
}

fn default_min_description_length() -> usize {
    10
}

fn default_generic_descriptions() -> Vec<String> {
    strings(&[
        "misc",
        "miscellaneous",
        "stuff",
        "expense",
        "expenses",
        "items",
        "things",
        "supplies",
        "other",
        "various",
        "food",
        "purchase",
    ])
}

fn default_high_amount_floor() -> Decimal {
    Decimal::new(75, 0)
}

fn default_typical_spend() -> BTreeMap<Category, Decimal> {
    BTreeMap::from([
        (Category::Travel, Decimal::new(500, 0)),
        (Category::Meals, Decimal::new(30, 0)),
        (Category::OfficeSupplies, Decimal::new(50, 0)),
        (Category::Equipment, Decimal::new(400, 0)),
        (Category::Software, Decimal::new(150, 0)),
        (Category::Training, Decimal::new(300, 0)),
    ])
}

fn default_typical_multiplier() -> Decimal {
    Decimal::new(2, 0)
}

fn default_medium_threshold() -> u8 {
    30
}

fn default_high_threshold() -> u8 {
    60
}

impl Default for RiskPoints {
    fn default() -> Self {
        Self {
            round_amount: default_round_amount_points(),
            threshold_gaming: default_threshold_gaming_points(),
            keyword: default_keyword_points(),
            too_short: default_too_short_points(),
            generic: default_generic_points(),
            no_evidence: default_no_evidence_points(),
            above_typical: default_above_typical_points(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            round_amounts: default_round_amounts(),
            round_epsilon: default_round_epsilon(),
            policy_thresholds: default_policy_thresholds(),
            threshold_tolerance: default_threshold_tolerance(),
            suspicious_keywords: default_suspicious_keywords(),
            min_description_length: default_min_description_length(),
            generic_descriptions: default_generic_descriptions(),
            high_amount_floor: default_high_amount_floor(),
            typical_spend: default_typical_spend(),
            typical_multiplier: default_typical_multiplier(),
            points: RiskPoints::default(),
            medium_threshold: default_medium_threshold(),
            high_threshold: default_high_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();

        assert_eq!(config.medium_threshold, 30);
        assert_eq!(config.high_threshold, 60);
        assert_eq!(config.min_description_length, 10);
        assert_eq!(config.high_amount_floor, Decimal::new(75, 0));
        assert_eq!(config.points.threshold_gaming, 25);
        assert!(config.suspicious_keywords.contains(&"test".to_string()));
        assert!(!config.typical_spend.contains_key(&Category::Other));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "medium_threshold": 40, "points": { "keyword": 35 } }"#;
        let config: RiskConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.medium_threshold, 40);
        assert_eq!(config.points.keyword, 35);
        assert_eq!(config.points.generic, 15); // default
        assert_eq!(config.high_threshold, 60); // default
    }

    #[test]
    fn test_typical_spend_keys_serialize_as_names() {
        let config = RiskConfig::default();
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"office_supplies\""));

        let parsed: RiskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
