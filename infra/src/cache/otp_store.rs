//! Redis-backed OTP store
//!
//! One key per identifier, `otp:{identifier}`, holding the JSON-encoded
//! record. The key outlives the code by a grace period so a late
//! verification still reports "expired" rather than "not found".

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use dl_core::domain::entities::OtpRecord;
use dl_core::errors::DomainError;
use dl_core::repositories::otp::OtpStore;
use dl_shared::utils::identifier::mask_identifier;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Key prefix for OTP records
pub const OTP_KEY_PREFIX: &str = "otp:";

/// How long a key survives past `expires_at`
pub const EXPIRED_RECORD_GRACE_SECS: u64 = 3600;

pub(crate) fn otp_key(identifier: &str) -> String {
    format!("{}{}", OTP_KEY_PREFIX, identifier)
}

/// OTP store over a shared [`RedisClient`]
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn retention_secs(record: &OtpRecord) -> u64 {
        let remaining = record.remaining(Utc::now()).num_seconds().max(0) as u64;
        remaining + EXPIRED_RECORD_GRACE_SECS
    }

    async fn read(&self, identifier: &str) -> Result<Option<OtpRecord>, InfrastructureError> {
        match self.client.get(&otp_key(identifier)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn upsert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        // created_at survives reissue; the read-modify-write is last-write-wins
        let stored = match self.read(&record.identifier).await? {
            Some(existing) => existing.superseded_by(record),
            None => record,
        };

        let payload = serde_json::to_string(&stored).map_err(InfrastructureError::from)?;
        self.client
            .set_with_expiry(&otp_key(&stored.identifier), &payload, Self::retention_secs(&stored))
            .await?;

        debug!(identifier = %mask_identifier(&stored.identifier), "OTP record written to Redis");
        Ok(stored)
    }

    async fn find(&self, identifier: &str) -> Result<Option<OtpRecord>, DomainError> {
        Ok(self.read(identifier).await?)
    }

    async fn delete(&self, record: &OtpRecord) -> Result<(), DomainError> {
        self.client.delete(&otp_key(&record.identifier)).await?;
        Ok(())
    }

    async fn delete_if_matches(&self, expected: &OtpRecord) -> Result<bool, DomainError> {
        // The stored value is the serialized record, so byte equality is version equality
        let payload = serde_json::to_string(expected).map_err(InfrastructureError::from)?;
        Ok(self
            .client
            .compare_and_delete(&otp_key(&expected.identifier), &payload)
            .await?)
    }
}
