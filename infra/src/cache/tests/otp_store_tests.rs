//! Tests for the Redis-backed OTP store

use chrono::{Duration, Utc};

use dl_core::domain::entities::OtpRecord;
use dl_core::domain::value_objects::Purpose;
use dl_core::repositories::otp::OtpStore;

use crate::cache::otp_store::{otp_key, RedisOtpStore};
use crate::cache::redis_client::RedisClient;

async fn store() -> RedisOtpStore {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    RedisOtpStore::new(RedisClient::new_with_retry_config(&url, 3, 100).await.unwrap())
}

fn record(identifier: &str, code: &str) -> OtpRecord {
    let now = Utc::now();
    OtpRecord::new(identifier, code, Some(Purpose::Verification), now + Duration::minutes(5), now)
}

#[test]
fn test_key_layout() {
    assert_eq!(otp_key("a@b.com"), "otp:a@b.com");
    assert_eq!(otp_key("+233241234567"), "otp:+233241234567");
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_upsert_overwrites_and_keeps_created_at() {
    let store = store().await;
    let first = store.upsert(record("redis-upsert@b.com", "111111")).await.unwrap();

    let mut next = record("redis-upsert@b.com", "222222");
    next.created_at = first.created_at + Duration::seconds(30);
    next.updated_at = next.created_at;
    let second = store.upsert(next).await.unwrap();

    assert_eq!(second.created_at, first.created_at);
    let found = store.find("redis-upsert@b.com").await.unwrap().unwrap();
    assert_eq!(found.code, "222222");

    store.delete(&found).await.unwrap();
    assert!(store.find("redis-upsert@b.com").await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_expired_record_remains_readable() {
    let store = store().await;
    let now = Utc::now();
    let expired = OtpRecord::new("redis-expired@b.com", "333333", None, now - Duration::minutes(1), now - Duration::minutes(6));

    store.upsert(expired).await.unwrap();
    let found = store.find("redis-expired@b.com").await.unwrap().unwrap();
    assert!(found.is_expired(Utc::now()));

    store.delete(&found).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_delete_if_matches_single_winner() {
    let store = store().await;
    let stored = store.upsert(record("redis-cad@b.com", "444444")).await.unwrap();
    let found = store.find("redis-cad@b.com").await.unwrap().unwrap();

    let (a, b) = tokio::join!(store.delete_if_matches(&found), store.delete_if_matches(&stored));
    assert!(a.unwrap() ^ b.unwrap());
    assert!(store.find("redis-cad@b.com").await.unwrap().is_none());
}
