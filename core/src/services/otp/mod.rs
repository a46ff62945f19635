//! OTP service module
//!
//! This module provides the complete one-time passcode workflow:
//! - Code generation from the OS CSPRNG
//! - Storage with one live code per identifier
//! - Delivery over email or SMS through pluggable senders
//! - Single-use verification with expiry and purpose checks

mod config;
mod dispatcher;
mod generator;
mod service;
mod traits;
mod types;
mod verifier;


pub use config::{OtpConfig, OtpServiceConfig};
pub use dispatcher::{NotificationDispatcher, DEFAULT_DISPATCH_TIMEOUT};
pub use generator::{expiry_from, generate_code};
pub use service::OtpService;
pub use traits::NotificationSender;
pub use types::{
    Delivery, DispatchOptions, DispatchResult, IssueOutcome, IssueRequest, OtpMessage, SendFailure,
};
pub use verifier::{verify, VerifyOutcome};
