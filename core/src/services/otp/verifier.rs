//! Code verification
//!
//! Pure check of a presented code against the stored record. The caller
//! deletes the record on [`VerifyOutcome::Verified`]; every other outcome
//! leaves it in place.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use serde::Serialize;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::Purpose;
use crate::errors::OtpError;

/// Outcome of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    Verified,
    NotFound,
    Expired,
    Mismatch,
    PurposeMismatch,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "verified",
            VerifyOutcome::NotFound => "not_found",
            VerifyOutcome::Expired => "expired",
            VerifyOutcome::Mismatch => "mismatch",
            VerifyOutcome::PurposeMismatch => "purpose_mismatch",
        }
    }

    /// Convert a failed outcome into its error
    pub fn into_result(self) -> Result<(), OtpError> {
        match self {
            VerifyOutcome::Verified => Ok(()),
            VerifyOutcome::NotFound => Err(OtpError::NotFound),
            VerifyOutcome::Expired => Err(OtpError::Expired),
            VerifyOutcome::Mismatch => Err(OtpError::Mismatch),
            VerifyOutcome::PurposeMismatch => Err(OtpError::PurposeMismatch),
        }
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check `presented` against `record`
///
/// Order: absent, expired, purpose, code. Expiry wins over a matching
/// code. A record without a purpose satisfies any purpose. Code comparison
/// is exact and constant-time.
pub fn verify(
    record: Option<&OtpRecord>,
    presented: &str,
    purpose: Purpose,
    now: DateTime<Utc>,
    enforce_purpose: bool,
) -> VerifyOutcome {
    let Some(record) = record else {
        return VerifyOutcome::NotFound;
    };

    if record.is_expired(now) {
        return VerifyOutcome::Expired;
    }

    if enforce_purpose {
        if let Some(issued_for) = record.purpose {
            if issued_for != purpose {
                return VerifyOutcome::PurposeMismatch;
            }
        }
    }

    if constant_time_eq(record.code.as_bytes(), presented.as_bytes()) {
        VerifyOutcome::Verified
    } else {
        VerifyOutcome::Mismatch
    }
}
