//! Contract checks shared by every store backend

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use claimflow_core::{Claim, ClaimSubmission, Decision, Outcome, StoredRecord, WorkflowState};
use claimflow_store::{ClaimStore, RecordPatch, StoreError};
use serde_json::json;
use std::collections::HashSet;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()
}

pub fn record(owner: &str, description: &str, at: DateTime<Utc>, outcome: Outcome) -> StoredRecord {
    let submission = ClaimSubmission::from_value(
        json!({
            "owner_id": owner,
            "amount": 42.5,
            "category": "meals",
            "description": description,
            "receipt_provided": true,
        }),
        at,
    );
    StoredRecord::new(
        Claim::from_submission(submission),
        Decision::automated(outcome, vec!["all checks passed".to_string()]),
        vec![WorkflowState::Started, WorkflowState::Decided],
    )
}

pub async fn insert_is_idempotent(store: &dyn ClaimStore) {
    let first = record("emp-1", "Team lunch with new hires", base_time(), Outcome::Approved);
    let mut second = first.clone();
    second.decision = Decision::automated(Outcome::Rejected, vec!["other".to_string()]);

    assert!(store.insert(&first).await.unwrap());
    assert!(!store.insert(&second).await.unwrap());

    let stored = store.get(first.id()).await.unwrap().unwrap();
    assert_eq!(stored.decision.outcome, Outcome::Approved);
}

pub async fn get_missing(store: &dyn ClaimStore) {
    let absent = record("emp-1", "Never stored anywhere", base_time(), Outcome::Approved);
    assert!(store.get(absent.id()).await.unwrap().is_none());
}

pub async fn pagination_is_complete(store: &dyn ClaimStore, page_size: usize) {
    let total = page_size * 2 + 3;
    let mut expected = HashSet::new();

    for i in 0..total {
        // two records per timestamp to exercise the id tie-break
        let at = base_time() + Duration::minutes((i / 2) as i64);
        let r = record("emp-pages", &format!("Dinner number {}", i), at, Outcome::Approved);
        expected.insert(r.id().as_str().to_string());
        assert!(store.insert(&r).await.unwrap());
    }
    // another owner's record must never show up
    let foreign = record("emp-other", "Dinner for someone else", base_time(), Outcome::Approved);
    store.insert(&foreign).await.unwrap();

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = store
            .query_by_owner("emp-pages", cursor.as_deref())
            .await
            .unwrap();
        pages += 1;
        assert!(page.records.len() <= page_size);
        seen.extend(page.records);

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(seen.len(), total);

    let ids: HashSet<String> = seen.iter().map(|r| r.id().as_str().to_string()).collect();
    assert_eq!(ids, expected);

    for pair in seen.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.submitted_at() > b.submitted_at()
                || (a.submitted_at() == b.submitted_at() && a.id().as_str() > b.id().as_str())
        );
    }
}

pub async fn unknown_owner_is_empty(store: &dyn ClaimStore) {
    let page = store.query_by_owner("nobody", None).await.unwrap();
    assert!(page.records.is_empty());
    assert!(page.next_cursor.is_none());
}

pub async fn invalid_cursor(store: &dyn ClaimStore) {
    let err = store
        .query_by_owner("emp-1", Some("zz-not-a-cursor"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidCursor(_)));
}

pub async fn guarded_merge(store: &dyn ClaimStore) {
    let r = record("emp-1", "Taxi to the airport", base_time(), Outcome::NeedsReview);
    store.insert(&r).await.unwrap();

    let approve = RecordPatch::decision(Decision::manual(
        Outcome::Approved,
        "Receipt verified by finance",
        Some("alice".to_string()),
    ))
    .expecting(Outcome::NeedsReview);

    let updated = store.merge_update(r.id(), approve.clone()).await.unwrap().unwrap();
    assert_eq!(updated.decision.outcome, Outcome::Approved);
    assert!(updated.decision.manual_override);
    assert!(updated.updated_at.is_some());

    // the guard no longer holds
    let err = store.merge_update(r.id(), approve).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict {
            actual: Outcome::Approved,
            ..
        }
    ));

    let stored = store.get(r.id()).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

pub async fn merge_missing(store: &dyn ClaimStore) {
    let absent = record("emp-1", "Never stored anywhere", base_time(), Outcome::Approved);
    let result = store
        .merge_update(absent.id(), RecordPatch::storage_error("x"))
        .await
        .unwrap();
    assert!(result.is_none());
}

pub async fn delete(store: &dyn ClaimStore) {
    let r = record("emp-1", "Conference coffee run", base_time(), Outcome::Approved);
    store.insert(&r).await.unwrap();

    assert!(store.delete(r.id()).await.unwrap());
    assert!(!store.delete(r.id()).await.unwrap());
    assert!(store.get(r.id()).await.unwrap().is_none());
}
