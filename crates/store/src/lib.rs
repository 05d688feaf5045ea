//! Claimflow Store - Idempotent record storage
//!
//! Records are keyed by their content-derived [`ClaimId`](claimflow_core::ClaimId).
//! Inserting the same id twice never overwrites: the first writer wins and
//! later inserts report `false`. All later mutation goes through
//! [`ClaimStore::merge_update`].
//!
//! Two backends:
//! - [`InMemoryClaimStore`]: mutex-guarded map, for tests and single-process use
//! - [`SqliteClaimStore`]: `sqlx` SQLite pool with versioned updates

pub mod config;
pub mod cursor;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryClaimStore;
pub use sqlite::SqliteClaimStore;
pub use traits::{ClaimStore, Page, RecordPatch};
