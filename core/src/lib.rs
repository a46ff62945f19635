//! # Daemonlite Core
//!
//! OTP domain layer for the Daemonlite backend.
//! This crate contains the OTP record entity, the store interface with an
//! in-memory implementation, code generation and verification, the
//! notification dispatcher, the issuing facade and a request rate limiter.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{OtpRecord, Purpose, Transport};
pub use errors::{DomainError, DomainResult, OtpError, ValidationError};
pub use repositories::{InMemoryOtpStore, OtpStore};
pub use services::{
    Clock, DispatchOptions, DispatchResult, InMemoryRateLimiter, IssueOutcome, IssueRequest,
    ManualClock, NotificationDispatcher, NotificationSender, OtpConfig, OtpService,
    OtpServiceConfig, RateLimitDecision, RateLimiterTrait, SystemClock, VerifyOutcome,
};
