//! Fixed-window request limiter
//!
//! Applied per client IP to OTP send and resend so a single caller cannot
//! flood a mailbox or handset.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::clock::{Clock, SystemClock};

/// Windows are pruned once the map grows past this many keys
const PRUNE_THRESHOLD: usize = 1024;

/// Result of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests allowed per window
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Seconds until the window resets
    pub retry_after_secs: u64,
}

/// Trait for rate limiting operations
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Count a request against `key` and report whether it is allowed
    async fn check_and_record(&self, key: &str) -> Result<RateLimitDecision, String>;

    /// Forget the window for `key`
    async fn reset(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

/// In-memory fixed-window limiter
pub struct InMemoryRateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self::with_clock(max_requests, window_secs, Arc::new(SystemClock))
    }

    pub fn with_clock(max_requests: u32, window_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_requests,
            window: Duration::seconds(
                i64::try_from(window_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000),
            ),
            windows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn seconds_until_reset(&self, window: &Window, now: DateTime<Utc>) -> u64 {
        let reset_at = window.started_at + self.window;
        let remaining_ms = (reset_at - now).num_milliseconds().max(0);
        // Round up so callers never retry a moment too early
        ((remaining_ms + 999) / 1000) as u64
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check_and_record(&self, key: &str) -> Result<RateLimitDecision, String> {
        let now = self.clock.now();
        let mut windows = self.windows.lock().await;

        if windows.len() > PRUNE_THRESHOLD {
            let span = self.window;
            windows.retain(|_, w| now < w.started_at + span);
        }

        let window = windows
            .entry(key.to_string())
            .and_modify(|w| {
                if now >= w.started_at + self.window {
                    *w = Window { started_at: now, count: 0 };
                }
            })
            .or_insert(Window { started_at: now, count: 0 });

        if window.count >= self.max_requests {
            let retry_after_secs = self.seconds_until_reset(window, now);
            tracing::warn!(
                key = key,
                limit = self.max_requests,
                retry_after_secs = retry_after_secs,
                event = "rate_limit_exceeded",
                "Rate limit exceeded"
            );
            return Ok(RateLimitDecision {
                allowed: false,
                limit: self.max_requests,
                remaining: 0,
                retry_after_secs,
            });
        }

        window.count += 1;
        let snapshot = *window;

        Ok(RateLimitDecision {
            allowed: true,
            limit: self.max_requests,
            remaining: self.max_requests - snapshot.count,
            retry_after_secs: self.seconds_until_reset(&snapshot, now),
        })
    }

    async fn reset(&self, key: &str) -> Result<(), String> {
        self.windows.lock().await.remove(key);
        Ok(())
    }
}
