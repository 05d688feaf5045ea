//! In-memory store

use async_trait::async_trait;
use claimflow_core::{ClaimId, StoredRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::StoreConfig;
use crate::cursor::{page_order, Cursor};
use crate::error::StoreResult;
use crate::traits::{ClaimStore, Page, RecordPatch};

/// Map-backed store; every operation holds the lock for its whole duration
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    records: Arc<RwLock<HashMap<String, StoredRecord>>>,
    config: StoreConfig,
}

impl InMemoryClaimStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert(&self, record: &StoredRecord) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.entry(record.id().as_str().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }

    async fn get(&self, id: &ClaimId) -> StoreResult<Option<StoredRecord>> {
        Ok(self.records.read().await.get(id.as_str()).cloned())
    }

    async fn query_by_owner(&self, owner_id: &str, cursor: Option<&str>) -> StoreResult<Page> {
        let after = cursor.map(Cursor::decode).transpose()?;
        let records = self.records.read().await;

        let mut matching: Vec<&StoredRecord> = records
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .filter(|r| after.as_ref().map_or(true, |c| c.precedes(r)))
            .collect();
        matching.sort_by(|a, b| {
            page_order(
                (a.submitted_at(), a.id().as_str()),
                (b.submitted_at(), b.id().as_str()),
            )
        });

        let has_more = matching.len() > self.config.page_size;
        let page: Vec<StoredRecord> = matching
            .into_iter()
            .take(self.config.page_size)
            .cloned()
            .collect();

        let next_cursor = match page.last() {
            Some(last) if has_more => Some(Cursor::after(last).encode()?),
            _ => None,
        };

        Ok(Page {
            records: page,
            next_cursor,
        })
    }

    async fn merge_update(
        &self,
        id: &ClaimId,
        patch: RecordPatch,
    ) -> StoreResult<Option<StoredRecord>> {
        let mut records = self.records.write().await;
        let Some(stored) = records.get_mut(id.as_str()) else {
            return Ok(None);
        };

        let mut updated = stored.clone();
        patch.apply_to(&mut updated)?;
        *stored = updated.clone();

        Ok(Some(updated))
    }

    async fn delete(&self, id: &ClaimId) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(id.as_str()).is_some())
    }
}
