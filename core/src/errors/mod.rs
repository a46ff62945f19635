//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{OtpError, ValidationError, DISPATCH_FAILED_MESSAGE, INVALID_OTP_MESSAGE};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// True when the caller, not the server, is at fault
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => true,
            DomainError::Otp(err) => err.is_verification_failure(),
            DomainError::Configuration { .. } | DomainError::Internal { .. } => false,
        }
    }

    /// Storage back-end failure
    pub fn storage(message: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: format!("OTP store failure: {}", message),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
