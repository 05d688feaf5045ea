mod common;

use claimflow_core::{Decision, Outcome};
use claimflow_store::{ClaimStore, RecordPatch, SqliteClaimStore, StoreConfig, StoreError};
use std::sync::Arc;
use tempfile::TempDir;

async fn store(page_size: usize) -> (SqliteClaimStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = SqliteClaimStore::open(
        dir.path().join("claims.db"),
        StoreConfig {
            page_size,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    (store, dir)
}

#[tokio::test]
async fn test_insert_is_idempotent() {
    let (store, _dir) = store(20).await;
    common::insert_is_idempotent(&store).await;
}

#[tokio::test]
async fn test_get_missing() {
    let (store, _dir) = store(20).await;
    common::get_missing(&store).await;
}

#[tokio::test]
async fn test_pagination_is_complete() {
    let (store, _dir) = store(4).await;
    common::pagination_is_complete(&store, 4).await;
}

#[tokio::test]
async fn test_unknown_owner_is_empty() {
    let (store, _dir) = store(20).await;
    common::unknown_owner_is_empty(&store).await;
}

#[tokio::test]
async fn test_invalid_cursor() {
    let (store, _dir) = store(20).await;
    common::invalid_cursor(&store).await;
}

#[tokio::test]
async fn test_guarded_merge() {
    let (store, _dir) = store(20).await;
    common::guarded_merge(&store).await;
}

#[tokio::test]
async fn test_merge_missing() {
    let (store, _dir) = store(20).await;
    common::merge_missing(&store).await;
}

#[tokio::test]
async fn test_delete() {
    let (store, _dir) = store(20).await;
    common::delete(&store).await;
}

#[tokio::test]
async fn test_in_memory_database() {
    let store = SqliteClaimStore::in_memory(StoreConfig::default()).await.unwrap();
    common::insert_is_idempotent(&store).await;
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("claims.db");
    let record = common::record(
        "emp-1",
        "Hotel night in Lyon",
        common::base_time(),
        Outcome::NeedsReview,
    );

    {
        let store = SqliteClaimStore::open(&path, StoreConfig::default()).await.unwrap();
        assert!(store.insert(&record).await.unwrap());
    }

    let store = SqliteClaimStore::open(&path, StoreConfig::default()).await.unwrap();
    let stored = store.get(record.id()).await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_single_winner() {
    let (store, _dir) = store(20).await;
    let store = Arc::new(store);
    let record = common::record(
        "emp-race",
        "Same claim submitted from two tabs",
        common::base_time(),
        Outcome::Approved,
    );

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let record = record.clone();
        handles.push(tokio::spawn(async move { store.insert(&record).await.unwrap() }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
}

async fn single_attempt_store() -> (Arc<SqliteClaimStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = SqliteClaimStore::open(
        dir.path().join("claims.db"),
        StoreConfig {
            max_update_attempts: 1,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    (Arc::new(store), dir)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_guarded_updates_single_winner() {
    let (store, _dir) = single_attempt_store().await;
    let record = common::record(
        "emp-race",
        "Conference badge and lanyard",
        common::base_time(),
        Outcome::NeedsReview,
    );
    assert!(store.insert(&record).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..12 {
        let store = Arc::clone(&store);
        let id = record.id().clone();
        handles.push(tokio::spawn(async move {
            let patch = RecordPatch::decision(Decision::manual(
                Outcome::Approved,
                "Checked against the invoice",
                Some(format!("reviewer-{}", i)),
            ))
            .expecting(Outcome::NeedsReview);
            store.merge_update(&id, patch).await
        }));
    }

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(Some(updated)) => winners.push(updated),
            Ok(None) => panic!("record disappeared"),
            Err(StoreError::Conflict { .. }) | Err(StoreError::Contention(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(winners.len(), 1);
    let stored = store.get(record.id()).await.unwrap().unwrap();
    assert_eq!(stored, winners[0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contention_gives_up_after_max_attempts() {
    let (store, _dir) = single_attempt_store().await;
    let record = common::record(
        "emp-race",
        "Parking at the client site",
        common::base_time(),
        Outcome::Approved,
    );
    assert!(store.insert(&record).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..12 {
        let store = Arc::clone(&store);
        let id = record.id().clone();
        handles.push(tokio::spawn(async move {
            let message = format!("write {}", i);
            (
                message.clone(),
                store.merge_update(&id, RecordPatch::storage_error(message)).await,
            )
        }));
    }

    let mut applied = Vec::new();
    for handle in handles {
        let (message, result) = handle.await.unwrap();
        match result {
            Ok(Some(_)) => applied.push(message),
            Err(StoreError::Contention(id)) => assert_eq!(id, record.id().to_string()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    // no lost update: the stored annotation is one that was reported as applied
    assert!(!applied.is_empty());
    let stored = store.get(record.id()).await.unwrap().unwrap();
    assert!(applied.contains(stored.storage_error.as_ref().unwrap()));
}
