//! Shared utilities and common types for the Daemonlite server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Configuration error types and the API response envelope
//! - Identifier utilities (email/phone validation and masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, EmailConfig, EmailProvider, Environment, LogFormat, LoggingConfig,
    NotificationConfig, OtpSettings, RateLimitConfig, ServerConfig, SmsConfig, SmsProvider,
    StoreBackend, StoreConfig,
};
pub use errors::{ConfigError, ConfigResult};
pub use types::ApiResponse;
pub use utils::{email, identifier, phone};
