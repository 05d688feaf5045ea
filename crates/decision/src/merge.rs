//! Merging the outputs of the parallel branches

use claimflow_core::{CheckResult, Claim, RiskAssessment};
use serde::{Deserialize, Serialize};

/// Output of one parallel branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "branch", content = "result", rename_all = "snake_case")]
pub enum PartialResult {
    Policy(CheckResult),
    Risk(RiskAssessment),
}

/// Merged branch outputs, one slot per branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelResults {
    pub policy: Option<CheckResult>,
    pub risk: Option<RiskAssessment>,
}

impl ParallelResults {
    pub fn is_empty(&self) -> bool {
        self.policy.is_none() && self.risk.is_none()
    }

    /// Copy the filled slots onto a claim; empty slots leave the claim untouched
    pub fn attach(self, mut claim: Claim) -> Claim {
        if let Some(policy) = self.policy {
            claim = claim.with_policy(policy);
        }
        if let Some(risk) = self.risk {
            claim = claim.with_risk(risk);
        }
        claim
    }
}

/// Fold branch outputs into one result.
///
/// Later entries overwrite earlier ones for the same slot; `None` entries
/// (a branch that produced nothing usable) are skipped.
pub fn merge<I>(parts: I) -> ParallelResults
where
    I: IntoIterator<Item = Option<PartialResult>>,
{
    parts
        .into_iter()
        .flatten()
        .fold(ParallelResults::default(), |mut acc, part| {
            match part {
                PartialResult::Policy(result) => acc.policy = Some(result),
                PartialResult::Risk(assessment) => acc.risk = Some(assessment),
            }
            acc
        })
}
