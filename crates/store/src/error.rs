//! Store errors

use claimflow_core::Outcome;
use thiserror::Error;

/// Errors from a claim store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Conflict on {id}: expected outcome {expected}, found {actual}")]
    Conflict {
        id: String,
        expected: Outcome,
        actual: Outcome,
    },

    #[error("Gave up updating {0} after repeated concurrent modifications")]
    Contention(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
