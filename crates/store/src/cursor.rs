//! Keyset pagination cursor
//!
//! Pages are ordered by `(submitted_at DESC, id DESC)`. A cursor names the last
//! record of the previous page; callers only ever see it as an opaque hex token.

use chrono::{DateTime, SecondsFormat, Utc};
use claimflow_core::StoredRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub submitted_at: DateTime<Utc>,
    pub id: String,
}

impl Cursor {
    /// Cursor pointing just past `record`
    pub fn after(record: &StoredRecord) -> Self {
        Self {
            submitted_at: record.submitted_at(),
            id: record.id().as_str().to_string(),
        }
    }

    pub fn encode(&self) -> StoreResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(hex::encode(json))
    }

    pub fn decode(token: &str) -> StoreResult<Self> {
        let bytes = hex::decode(token)
            .map_err(|e| StoreError::InvalidCursor(format!("not a cursor token: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::InvalidCursor(format!("malformed cursor: {}", e)))
    }

    /// Timestamp in the column format used by the SQLite backend
    pub fn submitted_at_key(&self) -> String {
        timestamp_key(self.submitted_at)
    }

    /// Whether `record` comes strictly after this cursor in page order
    pub fn precedes(&self, record: &StoredRecord) -> bool {
        page_order(
            (self.submitted_at, self.id.as_str()),
            (record.submitted_at(), record.id().as_str()),
        ) == Ordering::Less
    }
}

/// Sortable, fixed-width UTC timestamp
pub fn timestamp_key(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Page order: newest first, ties broken by id descending
pub fn page_order(a: (DateTime<Utc>, &str), b: (DateTime<Utc>, &str)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| b.1.cmp(a.1))
}
