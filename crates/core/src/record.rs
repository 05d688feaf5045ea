//! Stored record, workflow states and faults

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::claim::Claim;
use crate::decision::Decision;
use crate::identity::ClaimId;

/// Pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Validation,
    PolicyCheck,
    RiskScoring,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Validation => "validation",
            Step::PolicyCheck => "policy_check",
            Step::RiskScoring => "risk_scoring",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow state machine states
///
/// ```text
/// Started ─► ValidatedOk ─► Checking ─► Decided ─► Persisted
///        └─► ValidatedFail ───────────► Decided
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    Started,
    ValidatedOk,
    ValidatedFail,
    Checking,
    Decided,
    Persisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    RetriesExhausted,
}

/// Fault captured on the compensation path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowFault {
    pub kind: FaultKind,
    pub step: Step,
    pub attempts: u32,
    pub cause: String,
}

impl WorkflowFault {
    pub fn retries_exhausted(step: Step, attempts: u32, cause: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::RetriesExhausted,
            step,
            attempts,
            cause: cause.into(),
        }
    }

    /// One-line summary for decision reasons
    pub fn summary(&self) -> String {
        format!("workflow fault: {} failed after {} attempts", self.step, self.attempts)
    }
}

/// Durable projection of a decided claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub claim: Claim,
    pub decision: Decision,
    /// States the run went through, in order
    #[serde(default)]
    pub states: Vec<WorkflowState>,
    /// Non-fatal persistence failure observed by the workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredRecord {
    pub fn new(claim: Claim, decision: Decision, states: Vec<WorkflowState>) -> Self {
        Self {
            claim,
            decision,
            states,
            storage_error: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn id(&self) -> &ClaimId {
        &self.claim.id
    }

    pub fn owner_id(&self) -> &str {
        &self.claim.owner_id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.claim.submitted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimSubmission;
    use crate::decision::Outcome;
    use serde_json::json;

    #[test]
    fn test_fault_summary() {
        let fault = WorkflowFault::retries_exhausted(Step::RiskScoring, 4, "simulated outage");
        assert_eq!(fault.summary(), "workflow fault: risk_scoring failed after 4 attempts");
    }

    #[test]
    fn test_record_accessors() {
        let submission = ClaimSubmission::from_value(json!({ "owner_id": "emp-7" }), Utc::now());
        let claim = Claim::from_submission(submission);
        let id = claim.id.clone();
        let record = StoredRecord::new(
            claim,
            Decision::automated(Outcome::Rejected, vec!["failed validation".to_string()]),
            vec![WorkflowState::Started, WorkflowState::ValidatedFail],
        );

        assert_eq!(record.id(), &id);
        assert_eq!(record.owner_id(), "emp-7");
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let claim = Claim::from_submission(ClaimSubmission::from_value(json!({}), Utc::now()));
        let record = StoredRecord::new(
            claim,
            Decision::automated(Outcome::Approved, vec!["all checks passed".to_string()]),
            vec![WorkflowState::Started],
        );

        let json = serde_json::to_string(&record).unwrap();
        let parsed: StoredRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
