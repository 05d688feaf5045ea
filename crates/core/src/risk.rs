//! Risk assessment types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level - ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    /// Medium and high risk need a human
    pub fn needs_review(&self) -> bool {
        *self >= RiskLevel::Medium
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk rule that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFlag {
    #[serde(rename = "round amount")]
    RoundAmount,
    #[serde(rename = "threshold gaming")]
    ThresholdGaming,
    #[serde(rename = "keyword")]
    Keyword,
    #[serde(rename = "too short")]
    TooShort,
    #[serde(rename = "generic")]
    Generic,
    #[serde(rename = "no evidence for high amount")]
    NoEvidenceForHighAmount,
    #[serde(rename = "above typical")]
    AboveTypical,
}

impl RiskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::RoundAmount => "round amount",
            RiskFlag::ThresholdGaming => "threshold gaming",
            RiskFlag::Keyword => "keyword",
            RiskFlag::TooShort => "too short",
            RiskFlag::Generic => "generic",
            RiskFlag::NoEvidenceForHighAmount => "no evidence for high amount",
            RiskFlag::AboveTypical => "above typical",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the risk scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Always within 0..=100
    pub score: u8,
    pub level: RiskLevel,
    pub flags: Vec<RiskFlag>,
    pub analyzed_at: DateTime<Utc>,
}

impl RiskAssessment {
    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Human-readable explanation used in decision reasons
    pub fn explain(&self) -> String {
        let flags = if self.flags.is_empty() {
            "no flags".to_string()
        } else {
            self.flags
                .iter()
                .map(RiskFlag::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} risk (score {}): {}", self.level, self.score, flags)
    }
}
