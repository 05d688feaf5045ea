//! SQLite store (sqlx)
//!
//! Each record is kept as a JSON document next to the columns needed for
//! lookups and keyset paging. Updates are optimistic: a row is rewritten only
//! if its `version` is unchanged since it was read.

use async_trait::async_trait;
use claimflow_core::{ClaimId, StoredRecord};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;

use crate::config::StoreConfig;
use crate::cursor::{timestamp_key, Cursor};
use crate::error::{StoreError, StoreResult};
use crate::traits::{ClaimStore, Page, RecordPatch};

pub struct SqliteClaimStore {
    pool: SqlitePool,
    config: StoreConfig,
}

impl SqliteClaimStore {
    /// Open (or create) the database file and initialize the schema
    pub async fn open(db_path: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path.as_ref().display());
        let pool = SqlitePool::connect(&db_url).await?;
        Self::from_pool(pool, config).await
    }

    /// Private in-memory database
    pub async fn in_memory(config: StoreConfig) -> StoreResult<Self> {
        // every connection would get its own memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool, config).await
    }

    pub async fn from_pool(pool: SqlitePool, config: StoreConfig) -> StoreResult<Self> {
        let store = Self { pool, config };
        store.init().await?;
        Ok(store)
    }

    /// Initialize the schema
    async fn init(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS claim_records (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                submitted_at TEXT NOT NULL,
                outcome TEXT NOT NULL,
                record_json TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_claim_records_owner
            ON claim_records(owner_id, submitted_at DESC, id DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn decode(row: &SqliteRow) -> StoreResult<StoredRecord> {
        let json: String = row.try_get("record_json")?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn fetch_versioned(&self, id: &ClaimId) -> StoreResult<Option<(StoredRecord, i64)>> {
        let row = sqlx::query("SELECT record_json, version FROM claim_records WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let version: i64 = row.try_get("version")?;
                Ok(Some((Self::decode(&row)?, version)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ClaimStore for SqliteClaimStore {
    async fn insert(&self, record: &StoredRecord) -> StoreResult<bool> {
        let json = serde_json::to_string(record)?;

        let result = sqlx::query(
            r#"
            INSERT INTO claim_records (id, owner_id, submitted_at, outcome, record_json, version)
            VALUES (?, ?, ?, ?, ?, 0)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(record.id().as_str())
        .bind(record.owner_id())
        .bind(timestamp_key(record.submitted_at()))
        .bind(record.decision.outcome.as_str())
        .bind(json)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, id: &ClaimId) -> StoreResult<Option<StoredRecord>> {
        Ok(self.fetch_versioned(id).await?.map(|(record, _)| record))
    }

    async fn query_by_owner(&self, owner_id: &str, cursor: Option<&str>) -> StoreResult<Page> {
        let after = cursor.map(Cursor::decode).transpose()?;
        // one extra row tells us whether another page exists
        let limit = self.config.page_size as i64 + 1;

        let rows = match &after {
            Some(c) => {
                sqlx::query(
                    r#"
                    SELECT record_json FROM claim_records
                    WHERE owner_id = ?
                      AND (submitted_at < ? OR (submitted_at = ? AND id < ?))
                    ORDER BY submitted_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(owner_id)
                .bind(c.submitted_at_key())
                .bind(c.submitted_at_key())
                .bind(c.id.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT record_json FROM claim_records
                    WHERE owner_id = ?
                    ORDER BY submitted_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(owner_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut records = rows
            .iter()
            .map(Self::decode)
            .collect::<StoreResult<Vec<_>>>()?;

        let has_more = records.len() > self.config.page_size;
        records.truncate(self.config.page_size);

        let next_cursor = match records.last() {
            Some(last) if has_more => Some(Cursor::after(last).encode()?),
            _ => None,
        };

        Ok(Page {
            records,
            next_cursor,
        })
    }

    async fn merge_update(
        &self,
        id: &ClaimId,
        patch: RecordPatch,
    ) -> StoreResult<Option<StoredRecord>> {
        for attempt in 1..=self.config.max_update_attempts {
            let Some((mut record, version)) = self.fetch_versioned(id).await? else {
                return Ok(None);
            };

            patch.apply_to(&mut record)?;
            let json = serde_json::to_string(&record)?;

            let result = sqlx::query(
                r#"
                UPDATE claim_records
                SET record_json = ?, outcome = ?, version = version + 1
                WHERE id = ? AND version = ?
                "#,
            )
            .bind(json)
            .bind(record.decision.outcome.as_str())
            .bind(id.as_str())
            .bind(version)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 1 {
                return Ok(Some(record));
            }

            tracing::debug!(claim_id = %id, attempt, "Concurrent update, re-reading record");
        }

        Err(StoreError::Contention(id.to_string()))
    }

    async fn delete(&self, id: &ClaimId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM claim_records WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
