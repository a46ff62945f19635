//! # Infrastructure Layer
//!
//! Concrete back-ends for the Daemonlite OTP subsystem.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and the Redis-backed OTP store
//! - **Database**: MySQL pool and the MySQL-backed OTP store
//! - **Email**: SMTP delivery through lettre, plus a logging mock
//! - **SMS**: Arkesel HTTP delivery through reqwest, plus a logging mock
//! - **Notification**: builds the dispatcher from configuration
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL store (default)
//! - `redis-cache`: Enable the Redis store (default)

use dl_core::errors::DomainError;

/// Cache module - Redis client and OTP store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email transport module
pub mod email;

/// SMS transport module
pub mod sms;

/// Dispatcher assembly from configuration
pub mod notification;

#[cfg(feature = "redis-cache")]
pub use cache::{RedisClient, RedisOtpStore};
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlOtpStore};
pub use email::{MockEmailSender, SmtpEmailSender};
pub use notification::build_dispatcher;
pub use sms::{ArkeselSmsSender, MockSmsSender};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email service error: {0}")]
    Email(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            other => DomainError::storage(other),
        }
    }
}
