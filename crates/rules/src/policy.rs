//! Spending policy checker
//!
//! Every rule is evaluated; violations are reported in rule order
//! (hard limit, receipt, scrutiny).

use chrono::Utc;
use claimflow_core::{Category, CheckResult, Violation, ViolationKind};
use rust_decimal::Decimal;

use crate::config::PolicyConfig;

/// Checks a validated claim against the spending policy
#[derive(Debug, Clone, Default)]
pub struct PolicyChecker {
    config: PolicyConfig,
}

impl PolicyChecker {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Check a claim and stamp the result
    pub fn check(&self, amount: Decimal, category: Category, receipt_provided: bool) -> CheckResult {
        let violations = self.violations(amount, category, receipt_provided);

        tracing::debug!(
            category = %category,
            violations = violations.len(),
            "Policy checked"
        );

        CheckResult::from_violations(violations, Utc::now())
    }

    /// All policy violations for the given attributes
    pub fn violations(
        &self,
        amount: Decimal,
        category: Category,
        receipt_provided: bool,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(limit) = self.config.hard_limits.get(&category) {
            if amount > *limit {
                violations.push(Violation::new(
                    ViolationKind::HardLimit,
                    format!(
                        "Amount {} exceeds {} limit of {}",
                        money(amount),
                        category,
                        money(*limit)
                    ),
                ));
            }
        }

        if amount > self.config.receipt_required_above && !receipt_provided {
            violations.push(Violation::new(
                ViolationKind::MissingEvidence,
                format!(
                    "Receipt required for amounts over {}",
                    money(self.config.receipt_required_above)
                ),
            ));
        }

        if let Some(threshold) = self.config.scrutiny_thresholds.get(&category) {
            if amount > *threshold {
                violations.push(Violation::new(
                    ViolationKind::Scrutiny,
                    format!(
                        "Amount {} is above the {} review threshold of {} and needs additional scrutiny",
                        money(amount),
                        category,
                        money(*threshold)
                    ),
                ));
            }
        }

        violations
    }
}

/// Cents when that is exact, otherwise every significant digit
fn money(amount: Decimal) -> String {
    let amount = amount.normalize();
    if amount.scale() <= 2 {
        format!("${:.2}", amount)
    } else {
        format!("${}", amount)
    }
}
