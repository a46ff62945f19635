//! OTP record entity: the single live code bound to an identifier.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Purpose;

/// Default length of a generated code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default lifetime of a code (5 minutes)
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// Stored one-time passcode
///
/// At most one record exists per `identifier`. Issuing a new code for the
/// same identifier overwrites the code and expiry in place.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Email address or phone number the code is bound to (store key)
    pub identifier: String,

    /// Numeric code of fixed length
    pub code: String,

    /// Flow that requested the code; `None` matches any purpose
    #[serde(default)]
    pub purpose: Option<Purpose>,

    /// Timestamp after which the code is dead
    pub expires_at: DateTime<Utc>,

    /// When a code was first issued for this identifier
    pub created_at: DateTime<Utc>,

    /// Last issuance; doubles as the record version for compare-and-delete
    pub updated_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a freshly issued record
    pub fn new(
        identifier: impl Into<String>,
        code: impl Into<String>,
        purpose: Option<Purpose>,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            code: code.into(),
            purpose,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Dead once `now` reaches `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.is_expired(now) {
            Duration::zero()
        } else {
            self.expires_at - now
        }
    }

    /// Replace this record with a newer issuance, keeping `created_at`
    pub fn superseded_by(&self, next: OtpRecord) -> OtpRecord {
        OtpRecord {
            created_at: self.created_at,
            ..next
        }
    }

    /// Same code and same issuance as `other`
    pub fn same_version(&self, other: &OtpRecord) -> bool {
        self.identifier == other.identifier
            && self.code == other.code
            && self.updated_at == other.updated_at
    }
}

// The code is redacted so records can be logged with `?record`
impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("identifier", &self.identifier)
            .field("code", &"<redacted>")
            .field("purpose", &self.purpose)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
