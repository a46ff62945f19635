//! One-time passcode settings

use serde::{Deserialize, Serialize};

/// Shortest accepted code length
pub const MIN_CODE_LENGTH: usize = 4;
/// Longest accepted code length
pub const MAX_CODE_LENGTH: usize = 10;
/// Longest accepted code lifetime (one day)
pub const MAX_TTL_MINUTES: i64 = 1440;

/// OTP lifecycle settings read at start-up
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpSettings {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Minutes a code stays valid after issuance
    pub ttl_minutes: i64,

    /// Reject a code issued for a different purpose
    pub enforce_purpose: bool,

    /// Upper bound on a single email/SMS send
    pub dispatch_timeout_secs: u64,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_minutes: 5,
            enforce_purpose: true,
            dispatch_timeout_secs: 10,
        }
    }
}
