//! Decision - the disposition rendered for a claim

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Approved,
    Rejected,
    NeedsReview,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Approved => "APPROVED",
            Outcome::Rejected => "REJECTED",
            Outcome::NeedsReview => "NEEDS_REVIEW",
            Outcome::Failed => "FAILED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "APPROVED" => Some(Outcome::Approved),
            "REJECTED" => Some(Outcome::Rejected),
            "NEEDS_REVIEW" => Some(Outcome::NeedsReview),
            "FAILED" => Some(Outcome::Failed),
            _ => None,
        }
    }

    /// Whether a reviewer may still override this outcome
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Outcome::NeedsReview)
    }

    /// Outcomes a reviewer is allowed to set
    pub fn is_manual_choice(&self) -> bool {
        matches!(self, Outcome::Approved | Outcome::Rejected)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub reasons: Vec<String>,
    pub decided_at: DateTime<Utc>,
    #[serde(default)]
    pub manual_override: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
}

impl Decision {
    /// Decision rendered by the aggregator
    pub fn automated(outcome: Outcome, reasons: Vec<String>) -> Self {
        Self {
            outcome,
            reasons,
            decided_at: Utc::now(),
            manual_override: false,
            reviewer: None,
        }
    }

    /// Decision recorded by a human reviewer
    pub fn manual(outcome: Outcome, reason: impl Into<String>, reviewer: Option<String>) -> Self {
        Self {
            outcome,
            reasons: vec![reason.into()],
            decided_at: Utc::now(),
            manual_override: true,
            reviewer,
        }
    }
}
