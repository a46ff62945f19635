//! Tests for the in-memory OTP store

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::Purpose;
use crate::repositories::otp::{InMemoryOtpStore, OtpStore};

fn record(identifier: &str, code: &str, offset_secs: i64) -> OtpRecord {
    let now = Utc::now() + Duration::seconds(offset_secs);
    OtpRecord::new(
        identifier,
        code,
        Some(Purpose::Verification),
        now + Duration::minutes(5),
        now,
    )
}

#[tokio::test]
async fn test_upsert_then_find() {
    let store = InMemoryOtpStore::new();
    let stored = store.upsert(record("a@b.com", "111111", 0)).await.unwrap();

    let found = store.find("a@b.com").await.unwrap().unwrap();
    assert_eq!(found, stored);
    assert!(store.find("c@d.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_overwrites_and_keeps_created_at() {
    let store = InMemoryOtpStore::new();
    let first = store.upsert(record("a@b.com", "111111", 0)).await.unwrap();
    let second = store.upsert(record("a@b.com", "222222", 30)).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(second.code, "222222");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn test_find_returns_expired_records() {
    let store = InMemoryOtpStore::new();
    let now = Utc::now();
    let expired = OtpRecord::new("a@b.com", "111111", None, now - Duration::minutes(1), now - Duration::minutes(6));
    store.upsert(expired.clone()).await.unwrap();

    assert_eq!(store.find("a@b.com").await.unwrap(), Some(expired));
}

#[tokio::test]
async fn test_delete() {
    let store = InMemoryOtpStore::new();
    let stored = store.upsert(record("a@b.com", "111111", 0)).await.unwrap();

    store.delete(&stored).await.unwrap();
    assert!(store.is_empty().await);

    // Deleting an absent record is not an error
    store.delete(&stored).await.unwrap();
}

#[tokio::test]
async fn test_delete_if_matches_only_once() {
    let store = InMemoryOtpStore::new();
    let stored = store.upsert(record("a@b.com", "111111", 0)).await.unwrap();

    assert!(store.delete_if_matches(&stored).await.unwrap());
    assert!(!store.delete_if_matches(&stored).await.unwrap());
}

#[tokio::test]
async fn test_delete_if_matches_rejects_superseded_record() {
    let store = InMemoryOtpStore::new();
    let first = store.upsert(record("a@b.com", "111111", 0)).await.unwrap();
    store.upsert(record("a@b.com", "222222", 30)).await.unwrap();

    assert!(!store.delete_if_matches(&first).await.unwrap());
    assert_eq!(store.find("a@b.com").await.unwrap().unwrap().code, "222222");
}

#[tokio::test]
async fn test_concurrent_compare_and_delete_has_one_winner() {
    let store = Arc::new(InMemoryOtpStore::new());
    let stored = store.upsert(record("a@b.com", "111111", 0)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let expected = stored.clone();
        handles.push(tokio::spawn(async move {
            store.delete_if_matches(&expected).await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}
