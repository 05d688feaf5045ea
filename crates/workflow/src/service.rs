//! Claim service - the external surface of the workflow

use claimflow_core::{ClaimId, ClaimSubmission, Decision, Outcome, StoredRecord};
use claimflow_store::{ClaimStore, Page, RecordPatch, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{ClaimflowConfig, ReviewConfig};
use crate::error::{ReviewError, WorkflowError};
use crate::fault::{FaultInjector, NoFaults, RandomFaults};
use crate::orchestrator::{Persistence, WorkflowOrchestrator, WorkflowRun};

/// Returned to the submitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub identity: ClaimId,
    pub outcome: Outcome,
    pub persistence: Persistence,
    /// The record as computed by this run (with `storage_error` if the write failed)
    pub record: StoredRecord,
}

impl From<WorkflowRun> for SubmitReceipt {
    fn from(run: WorkflowRun) -> Self {
        Self {
            identity: run.record.id().clone(),
            outcome: run.record.decision.outcome,
            persistence: run.persistence,
            record: run.record,
        }
    }
}

/// Reviewer's decision on a claim awaiting review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualDecision {
    pub outcome: Outcome,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
}

impl ManualDecision {
    pub fn approve(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Approved,
            reason: reason.into(),
            reviewer: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Rejected,
            reason: reason.into(),
            reviewer: None,
        }
    }

    pub fn by(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewer = Some(reviewer.into());
        self
    }
}

pub struct ClaimService {
    orchestrator: Arc<WorkflowOrchestrator>,
    store: Arc<dyn ClaimStore>,
    review: ReviewConfig,
}

impl ClaimService {
    /// Service with faults injected according to `config.chaos`
    pub fn new(config: &ClaimflowConfig, store: Arc<dyn ClaimStore>) -> Self {
        let faults: Arc<dyn FaultInjector> = if config.chaos.is_enabled() {
            tracing::warn!(
                failure_rate = config.chaos.failure_rate,
                "Chaos mode enabled, step attempts will fail at random"
            );
            Arc::new(RandomFaults::new(config.chaos.failure_rate))
        } else {
            Arc::new(NoFaults)
        };
        Self::with_faults(config, store, faults)
    }

    pub fn with_faults(
        config: &ClaimflowConfig,
        store: Arc<dyn ClaimStore>,
        faults: Arc<dyn FaultInjector>,
    ) -> Self {
        let orchestrator = WorkflowOrchestrator::new(config, Arc::clone(&store), faults);
        Self {
            orchestrator: Arc::new(orchestrator),
            store,
            review: config.review.clone(),
        }
    }

    /// Decide and persist a claim
    pub async fn submit(&self, submission: ClaimSubmission) -> SubmitReceipt {
        self.orchestrator.run(submission).await.into()
    }

    /// Submit several claims, each on its own task. Results keep input order.
    pub async fn submit_batch(
        &self,
        submissions: Vec<ClaimSubmission>,
    ) -> Vec<Result<SubmitReceipt, WorkflowError>> {
        let handles: Vec<_> = submissions
            .into_iter()
            .map(|submission| {
                let orchestrator = Arc::clone(&self.orchestrator);
                tokio::spawn(async move { orchestrator.run(submission).await })
            })
            .collect();

        let mut receipts = Vec::with_capacity(handles.len());
        for handle in handles {
            receipts.push(handle.await.map(SubmitReceipt::from).map_err(WorkflowError::from));
        }
        receipts
    }

    pub async fn get(&self, id: &ClaimId) -> StoreResult<Option<StoredRecord>> {
        self.store.get(id).await
    }

    pub async fn query_by_owner(&self, owner_id: &str, cursor: Option<&str>) -> StoreResult<Page> {
        self.store.query_by_owner(owner_id, cursor).await
    }

    /// Record a reviewer's decision on a claim in NEEDS_REVIEW
    pub async fn apply_manual_decision(
        &self,
        id: &ClaimId,
        manual: ManualDecision,
    ) -> Result<StoredRecord, ReviewError> {
        if !manual.outcome.is_manual_choice() {
            return Err(ReviewError::InvalidDecision(format!(
                "{} (expected APPROVED or REJECTED)",
                manual.outcome
            )));
        }

        let reason = manual.reason.trim();
        if reason.chars().count() < self.review.min_reason_length {
            return Err(ReviewError::InvalidReason(format!(
                "must be at least {} characters",
                self.review.min_reason_length
            )));
        }

        let current = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;

        if !current.decision.outcome.is_reviewable() {
            return Err(ReviewError::NotReviewable {
                id: id.to_string(),
                outcome: current.decision.outcome,
            });
        }

        let decision = Decision::manual(manual.outcome, reason, manual.reviewer.clone());
        let patch = RecordPatch::decision(decision).expecting(Outcome::NeedsReview);

        let updated = match self.store.merge_update(id, patch).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(ReviewError::NotFound(id.to_string())),
            // someone else decided it between our read and the update
            Err(StoreError::Conflict { actual, .. }) => {
                return Err(ReviewError::NotReviewable {
                    id: id.to_string(),
                    outcome: actual,
                })
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            claim_id = %id,
            outcome = %updated.decision.outcome,
            reviewer = manual.reviewer.as_deref().unwrap_or("unknown"),
            "Manual decision applied"
        );

        Ok(updated)
    }

    /// Administrative removal
    pub async fn delete(&self, id: &ClaimId) -> StoreResult<bool> {
        self.store.delete(id).await
    }
}
