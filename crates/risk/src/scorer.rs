//! Risk scorer implementation

use chrono::Utc;
use claimflow_core::{ClaimAttributes, RiskAssessment, RiskFlag, RiskLevel};
use rust_decimal::Decimal;

use crate::config::RiskConfig;

const MAX_SCORE: u32 = 100;

/// Rule-based risk scorer
///
/// Rules are independent; each contributes its points at most once.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: RiskConfig,
}

impl RiskScorer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Score a validated claim
    pub fn score(&self, claim: &ClaimAttributes) -> RiskAssessment {
        let points = &self.config.points;
        let mut total: u32 = 0;
        let mut flags = Vec::new();

        let mut fire = |flag: RiskFlag, contribution: u32| {
            total = total.saturating_add(contribution);
            flags.push(flag);
        };

        if self.is_round_amount(claim.amount) {
            fire(RiskFlag::RoundAmount, points.round_amount);
        }

        if self.is_just_below_threshold(claim.amount) {
            fire(RiskFlag::ThresholdGaming, points.threshold_gaming);
        }

        let description = claim.description.trim().to_lowercase();

        if self.has_suspicious_keyword(&description) {
            fire(RiskFlag::Keyword, points.keyword);
        }

        // Length check wins; a short description is never also "generic"
        if description.chars().count() < self.config.min_description_length {
            fire(RiskFlag::TooShort, points.too_short);
        } else if self.is_generic(&description) {
            fire(RiskFlag::Generic, points.generic);
        }

        if claim.amount > self.config.high_amount_floor && !claim.receipt_provided {
            fire(RiskFlag::NoEvidenceForHighAmount, points.no_evidence);
        }

        if let Some(typical) = self.config.typical_spend.get(&claim.category) {
            if claim.amount > *typical * self.config.typical_multiplier {
                fire(RiskFlag::AboveTypical, points.above_typical);
            }
        }

        let score = total.min(MAX_SCORE) as u8;
        let level = self.level_for(score);

        tracing::debug!(score, level = %level, flags = ?flags, "Risk scored");

        RiskAssessment {
            score,
            level,
            flags,
            analyzed_at: Utc::now(),
        }
    }

    /// Map a score to a level
    pub fn level_for(&self, score: u8) -> RiskLevel {
        if score >= self.config.high_threshold {
            RiskLevel::High
        } else if score >= self.config.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn is_round_amount(&self, amount: Decimal) -> bool {
        self.config
            .round_amounts
            .iter()
            .any(|v| (amount - *v).abs() <= self.config.round_epsilon)
    }

    fn is_just_below_threshold(&self, amount: Decimal) -> bool {
        self.config.policy_thresholds.iter().any(|t| {
            amount < *t && amount >= *t - self.config.threshold_tolerance
        })
    }

    fn has_suspicious_keyword(&self, description: &str) -> bool {
        self.config
            .suspicious_keywords
            .iter()
            .any(|k| description.contains(k.to_lowercase().as_str()))
    }

    fn is_generic(&self, description: &str) -> bool {
        self.config
            .generic_descriptions
            .iter()
            .any(|g| description == g.to_lowercase())
    }
}
