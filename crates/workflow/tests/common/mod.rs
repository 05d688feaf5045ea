//! Shared fixtures for workflow tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use claimflow_core::{ClaimId, ClaimSubmission, Step, StoredRecord};
use claimflow_store::{ClaimStore, InMemoryClaimStore, Page, RecordPatch, StoreError, StoreResult};
use claimflow_workflow::{ClaimService, ClaimflowConfig, FaultInjector, StepError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 10, 30, 0).unwrap()
}

pub fn submission(value: Value) -> ClaimSubmission {
    ClaimSubmission::from_value(value, monday())
}

/// Clean meal, well within every limit
pub fn scenario_a() -> Value {
    json!({
        "owner_id": "emp-1",
        "amount": 45.00,
        "category": "meals",
        "description": "Team lunch at downtown restaurant",
        "receipt_provided": true,
    })
}

/// Meal far above the category ceiling
pub fn scenario_b() -> Value {
    json!({
        "owner_id": "emp-1",
        "amount": 200.00,
        "category": "meals",
        "description": "Client dinner with partners",
        "receipt_provided": true,
    })
}

/// Just below a threshold with a suspicious word
pub fn scenario_c() -> Value {
    json!({
        "owner_id": "emp-1",
        "amount": 24.99,
        "category": "office_supplies",
        "description": "test supplies for office use",
        "receipt_provided": false,
    })
}

/// Missing three required fields
pub fn scenario_d() -> Value {
    json!({
        "owner_id": "emp-1",
        "description": "Taxi",
    })
}

pub fn service(store: Arc<dyn ClaimStore>) -> ClaimService {
    ClaimService::new(&ClaimflowConfig::default(), store)
}

pub fn memory_service() -> (ClaimService, Arc<InMemoryClaimStore>) {
    let store = Arc::new(InMemoryClaimStore::default());
    (service(store.clone()), store)
}

/// Fails the first `failures` attempts of one step and counts every attempt
pub struct FlakyStep {
    step: Step,
    failures: u32,
    attempts: AtomicU32,
}

impl FlakyStep {
    pub fn new(step: Step, failures: u32) -> Self {
        Self {
            step,
            failures,
            attempts: AtomicU32::new(0),
        }
    }

    pub fn always(step: Step) -> Self {
        Self::new(step, u32::MAX)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FaultInjector for FlakyStep {
    async fn before_attempt(&self, step: Step, attempt: u32) -> Result<(), StepError> {
        if step != self.step {
            return Ok(());
        }
        let seen = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if seen <= self.failures {
            return Err(StepError::transient(step, attempt, "simulated outage"));
        }
        Ok(())
    }
}

/// Store whose writes always fail
#[derive(Default)]
pub struct BrokenStore {
    inner: InMemoryClaimStore,
}

#[async_trait]
impl ClaimStore for BrokenStore {
    async fn insert(&self, _record: &StoredRecord) -> StoreResult<bool> {
        Err(StoreError::Backend("disk full".to_string()))
    }

    async fn get(&self, id: &ClaimId) -> StoreResult<Option<StoredRecord>> {
        self.inner.get(id).await
    }

    async fn query_by_owner(&self, owner_id: &str, cursor: Option<&str>) -> StoreResult<Page> {
        self.inner.query_by_owner(owner_id, cursor).await
    }

    async fn merge_update(
        &self,
        id: &ClaimId,
        patch: RecordPatch,
    ) -> StoreResult<Option<StoredRecord>> {
        self.inner.merge_update(id, patch).await
    }

    async fn delete(&self, id: &ClaimId) -> StoreResult<bool> {
        self.inner.delete(id).await
    }
}
