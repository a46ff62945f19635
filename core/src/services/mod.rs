//! Business services containing domain logic and use cases.

pub mod clock;
pub mod otp;
pub mod rate_limit;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use otp::{
    Delivery, DispatchOptions, DispatchResult, IssueOutcome, IssueRequest, NotificationDispatcher,
    NotificationSender, OtpConfig, OtpMessage, OtpService, OtpServiceConfig, SendFailure,
    VerifyOutcome,
};
pub use rate_limit::{InMemoryRateLimiter, RateLimitDecision, RateLimiterTrait};
