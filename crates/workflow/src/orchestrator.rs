//! Workflow orchestrator
//!
//! Drives one claim through validation, the parallel policy/risk branches, the
//! decision and persistence. A run never fails as a whole: bad input becomes a
//! rejection, exhausted retries become a FAILED decision and storage faults
//! become an annotation on the returned record.

use chrono::Utc;
use claimflow_core::{
    Claim, ClaimAttributes, ClaimId, ClaimSubmission, CheckResult, RiskAssessment, Step,
    StoredRecord, WorkflowFault, WorkflowState,
};
use claimflow_decision::{decide, merge, PartialResult};
use claimflow_risk::RiskScorer;
use claimflow_rules::{PolicyChecker, Validator};
use claimflow_store::ClaimStore;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{ClaimflowConfig, RetryConfig};
use crate::error::StepError;
use crate::fault::FaultInjector;

/// What happened when the record was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum Persistence {
    Inserted,
    /// A record with the same identity already existed; it was left untouched
    Duplicate,
    /// The store failed; the decision stands but nothing was written
    Failed(String),
}

/// Result of one workflow run
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub run_id: Uuid,
    pub record: StoredRecord,
    pub persistence: Persistence,
}

pub struct WorkflowOrchestrator {
    validator: Validator,
    policy: PolicyChecker,
    scorer: RiskScorer,
    retry: RetryConfig,
    faults: Arc<dyn FaultInjector>,
    store: Arc<dyn ClaimStore>,
}

impl WorkflowOrchestrator {
    pub fn new(
        config: &ClaimflowConfig,
        store: Arc<dyn ClaimStore>,
        faults: Arc<dyn FaultInjector>,
    ) -> Self {
        Self {
            validator: Validator::new(config.validation.clone()),
            policy: PolicyChecker::new(config.policy.clone()),
            scorer: RiskScorer::new(config.risk.clone()),
            retry: config.retry.clone(),
            faults,
            store,
        }
    }

    /// Run a submission through the whole pipeline
    pub async fn run(&self, submission: ClaimSubmission) -> WorkflowRun {
        let run_id = Uuid::new_v4();
        let mut states = vec![WorkflowState::Started];
        let claim = Claim::from_submission(submission);

        tracing::debug!(%run_id, claim_id = %claim.id, "Workflow started");

        let claim = match self.validator.parse(&claim.fields, claim.submitted_at) {
            Err(errors) => {
                tracing::debug!(
                    claim_id = %claim.id,
                    step = %Step::Validation,
                    errors = errors.len(),
                    "Validation failed"
                );
                states.push(WorkflowState::ValidatedFail);
                claim.with_validation(CheckResult::from_errors(errors, Utc::now()))
            }
            Ok(attrs) => {
                states.push(WorkflowState::ValidatedOk);
                let claim = claim.with_validation(CheckResult::from_violations(vec![], Utc::now()));

                states.push(WorkflowState::Checking);
                self.check(claim, &attrs).await
            }
        };

        let decision = decide(&claim);
        states.push(WorkflowState::Decided);

        tracing::info!(
            %run_id,
            claim_id = %claim.id,
            outcome = %decision.outcome,
            "Claim decided"
        );

        let mut record = StoredRecord::new(claim, decision, states);
        let persistence = self.persist(&mut record).await;

        WorkflowRun {
            run_id,
            record,
            persistence,
        }
    }

    /// Policy and risk in parallel; a fault replaces both results
    async fn check(&self, claim: Claim, attrs: &ClaimAttributes) -> Claim {
        let (policy, risk) = tokio::join!(
            self.run_policy(&claim.id, attrs),
            self.run_risk(&claim.id, attrs)
        );

        match (policy, risk) {
            (Ok(policy), Ok(risk)) => merge([
                Some(PartialResult::Policy(policy)),
                Some(PartialResult::Risk(risk)),
            ])
            .attach(claim),
            (Err(fault), _) | (_, Err(fault)) => claim.with_fault(fault),
        }
    }

    async fn run_policy(
        &self,
        claim_id: &ClaimId,
        attrs: &ClaimAttributes,
    ) -> Result<CheckResult, WorkflowFault> {
        // policy is retried immediately
        self.with_retry(claim_id, Step::PolicyCheck, self.retry.policy_max_attempts, 0)
            .await?;
        Ok(self
            .policy
            .check(attrs.amount, attrs.category, attrs.receipt_provided))
    }

    async fn run_risk(
        &self,
        claim_id: &ClaimId,
        attrs: &ClaimAttributes,
    ) -> Result<RiskAssessment, WorkflowFault> {
        self.with_retry(
            claim_id,
            Step::RiskScoring,
            self.retry.risk_max_attempts,
            self.retry.backoff_ms,
        )
        .await?;
        Ok(self.scorer.score(attrs))
    }

    /// Wait until an attempt of `step` is allowed to run.
    ///
    /// Makes at most `max_attempts` attempts; each consults the fault injector
    /// exactly once. `backoff_ms` of 0 retries without delay.
    async fn with_retry(
        &self,
        claim_id: &ClaimId,
        step: Step,
        max_attempts: u32,
        backoff_ms: u64,
    ) -> Result<(), WorkflowFault> {
        let mut last_error: Option<StepError> = None;

        for attempt in 1..=max_attempts {
            match self.faults.before_attempt(step, attempt).await {
                Ok(()) => {
                    tracing::debug!(claim_id = %claim_id, step = %step, attempt, "Step running");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        claim_id = %claim_id,
                        step = %step,
                        attempt,
                        error = %e,
                        "Step attempt failed"
                    );
                    last_error = Some(e);
                    if attempt < max_attempts {
                        backoff(backoff_ms, attempt).await;
                    }
                }
            }
        }

        let cause = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts allowed".to_string());

        tracing::error!(
            claim_id = %claim_id,
            step = %step,
            attempts = max_attempts,
            cause = %cause,
            "Retries exhausted"
        );

        Err(WorkflowFault::retries_exhausted(step, max_attempts, cause))
    }

    async fn persist(&self, record: &mut StoredRecord) -> Persistence {
        record.states.push(WorkflowState::Persisted);

        match self.store.insert(record).await {
            Ok(true) => Persistence::Inserted,
            Ok(false) => {
                tracing::info!(claim_id = %record.id(), "Duplicate submission, existing record kept");
                Persistence::Duplicate
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(claim_id = %record.id(), error = %message, "Failed to persist claim");

                record.states.pop();
                record.storage_error = Some(message.clone());
                Persistence::Failed(message)
            }
        }
    }
}

/// Linear backoff with up to 100% jitter
async fn backoff(base_ms: u64, attempt: u32) {
    if base_ms == 0 {
        return;
    }

    let jitter = rand::thread_rng().gen_range(0..=base_ms);
    let delay = base_ms.saturating_mul(attempt as u64).saturating_add(jitter);
    tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
}
