//! OTP and validation error types

use thiserror::Error;

/// User-facing message shared by every verification failure
pub const INVALID_OTP_MESSAGE: &str = "Invalid OTP or expired";

/// User-facing message for a failed delivery
pub const DISPATCH_FAILED_MESSAGE: &str = "Failed to send OTP";

/// OTP lifecycle failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP not found")]
    NotFound,

    #[error("OTP expired")]
    Expired,

    #[error("OTP does not match")]
    Mismatch,

    #[error("OTP was issued for a different purpose")]
    PurposeMismatch,

    #[error("Failed to send OTP via {transport}: {reason}")]
    Dispatch { transport: String, reason: String },
}

impl OtpError {
    /// Not-found, expired, mismatch and purpose mismatch all count as a bad code
    pub fn is_verification_failure(&self) -> bool {
        !matches!(self, OtpError::Dispatch { .. })
    }

    /// Message safe to show the caller
    ///
    /// Verification failures collapse into one message so the response does
    /// not reveal whether an identifier has a live code.
    pub fn public_message(&self) -> &'static str {
        if self.is_verification_failure() {
            INVALID_OTP_MESSAGE
        } else {
            DISPATCH_FAILED_MESSAGE
        }
    }
}

/// Request validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Value out of range for field: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Unsupported transport method: {transport}")]
    UnsupportedTransport { transport: String },

    #[error("Unknown OTP purpose: {purpose}")]
    UnknownPurpose { purpose: String },

    #[error("Too many requests. Please try again in {retry_after_secs} seconds")]
    RateLimitExceeded { retry_after_secs: u64 },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField { field: field.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_verification_failures_share_public_message() {
        for err in [
            OtpError::NotFound,
            OtpError::Expired,
            OtpError::Mismatch,
            OtpError::PurposeMismatch,
        ] {
            assert!(err.is_verification_failure());
            assert_eq!(err.public_message(), INVALID_OTP_MESSAGE);
        }
    }

    #[test]
    fn test_dispatch_error_is_not_client_error() {
        let err = OtpError::Dispatch {
            transport: "sms".into(),
            reason: "provider returned fail".into(),
        };
        assert_eq!(err.public_message(), DISPATCH_FAILED_MESSAGE);
        assert!(!DomainError::from(err).is_client_error());
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("identifier").to_string(),
            "Field required: identifier"
        );
        assert_eq!(
            ValidationError::UnsupportedTransport { transport: "fax".into() }.to_string(),
            "Unsupported transport method: fax"
        );
        assert!(DomainError::from(ValidationError::InvalidEmail).is_client_error());
    }
}
