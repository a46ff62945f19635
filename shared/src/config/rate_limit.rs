//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Fixed-window limits applied per client IP to OTP send and resend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Requests allowed inside one window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 5,
            window_secs: 60,
        }
    }
}
