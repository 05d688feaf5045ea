//! Priority-ordered decision rules

use claimflow_core::{Claim, Decision, Outcome, RiskLevel, ViolationKind};

pub const REASON_FAILED_VALIDATION: &str = "failed validation";
pub const REASON_SPENDING_LIMIT: &str = "exceeds spending limit";
pub const REASON_ALL_PASSED: &str = "all checks passed";

/// Decide a claim.
///
/// Missing policy counts as passed and missing risk as LOW; only missing
/// validation leads to rejection.
pub fn decide(claim: &Claim) -> Decision {
    let decision = evaluate(claim);

    tracing::debug!(
        claim_id = %claim.id,
        outcome = %decision.outcome,
        reasons = decision.reasons.len(),
        "Decision rendered"
    );

    decision
}

fn evaluate(claim: &Claim) -> Decision {
    // 0. Fault
    if let Some(fault) = &claim.fault {
        return Decision::automated(Outcome::Failed, vec![fault.summary(), fault.cause.clone()]);
    }

    // 1. Validation
    match &claim.validation {
        Some(v) if v.passed => {}
        Some(v) => {
            let mut reasons = vec![REASON_FAILED_VALIDATION.to_string()];
            reasons.extend(v.messages());
            return Decision::automated(Outcome::Rejected, reasons);
        }
        None => {
            return Decision::automated(
                Outcome::Rejected,
                vec![REASON_FAILED_VALIDATION.to_string()],
            );
        }
    }

    // 2. Hard limit
    if let Some(policy) = &claim.policy {
        if policy.has_kind(ViolationKind::HardLimit) {
            let mut reasons = vec![REASON_SPENDING_LIMIT.to_string()];
            reasons.extend(policy.messages());
            return Decision::automated(Outcome::Rejected, reasons);
        }
    }

    // 3. Review
    let policy_passed = claim.policy.as_ref().map_or(true, |p| p.passed);
    let risk_level = claim.risk.as_ref().map_or(RiskLevel::Low, |r| r.level);

    if !policy_passed || risk_level.needs_review() {
        let mut reasons = claim
            .policy
            .as_ref()
            .map(|p| p.messages())
            .unwrap_or_default();
        if let Some(risk) = &claim.risk {
            reasons.push(risk.explain());
        }
        return Decision::automated(Outcome::NeedsReview, reasons);
    }

    // 4. Approve
    Decision::automated(Outcome::Approved, vec![REASON_ALL_PASSED.to_string()])
}
