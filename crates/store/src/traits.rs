//! Store trait and shared types

use async_trait::async_trait;
use chrono::Utc;
use claimflow_core::{ClaimId, Decision, Outcome, StoredRecord};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// One page of an owner's records, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub records: Vec<StoredRecord>,
    /// Token for the next page; `None` on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Shallow patch applied by [`ClaimStore::merge_update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub decision: Option<Decision>,
    pub storage_error: Option<String>,
    /// Apply only if the stored outcome still equals this
    pub expected_outcome: Option<Outcome>,
}

impl RecordPatch {
    pub fn decision(decision: Decision) -> Self {
        Self {
            decision: Some(decision),
            ..Default::default()
        }
    }

    pub fn storage_error(message: impl Into<String>) -> Self {
        Self {
            storage_error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn expecting(mut self, outcome: Outcome) -> Self {
        self.expected_outcome = Some(outcome);
        self
    }

    /// Check the guard and apply the patch to `record`, stamping `updated_at`
    pub fn apply_to(&self, record: &mut StoredRecord) -> StoreResult<()> {
        if let Some(expected) = self.expected_outcome {
            if record.decision.outcome != expected {
                return Err(StoreError::Conflict {
                    id: record.id().to_string(),
                    expected,
                    actual: record.decision.outcome,
                });
            }
        }

        if let Some(decision) = &self.decision {
            record.decision = decision.clone();
        }
        if let Some(message) = &self.storage_error {
            record.storage_error = Some(message.clone());
        }
        record.updated_at = Some(Utc::now());

        Ok(())
    }
}

/// Durable, idempotent record storage
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Insert if absent. Returns `false` when a record with the same id exists.
    async fn insert(&self, record: &StoredRecord) -> StoreResult<bool>;

    async fn get(&self, id: &ClaimId) -> StoreResult<Option<StoredRecord>>;

    /// One page of `owner_id`'s records, newest `submitted_at` first
    async fn query_by_owner(&self, owner_id: &str, cursor: Option<&str>) -> StoreResult<Page>;

    /// Atomically apply `patch`. Returns the updated record, or `None` if absent.
    async fn merge_update(
        &self,
        id: &ClaimId,
        patch: RecordPatch,
    ) -> StoreResult<Option<StoredRecord>>;

    /// Remove a record. Returns whether one existed.
    async fn delete(&self, id: &ClaimId) -> StoreResult<bool>;
}
