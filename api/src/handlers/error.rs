//! Mapping of domain errors onto HTTP responses
//!
//! Verification failures share one message and storage or configuration
//! details never reach the client.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use validator::ValidationErrors;

use dl_core::errors::{DomainError, OtpError, ValidationError, DISPATCH_FAILED_MESSAGE};
use dl_shared::types::ApiResponse;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by OTP handlers
#[derive(Debug)]
pub struct ApiError {
    pub error: DomainError,
}

impl ApiError {
    pub fn new(error: DomainError) -> Self {
        Self { error }
    }

    /// Message safe to show the caller
    pub fn public_message(&self) -> String {
        match &self.error {
            DomainError::Otp(otp) => otp.public_message().to_string(),
            DomainError::ValidationErr(validation) => validation.to_string(),
            DomainError::Validation { message } => message.clone(),
            DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.error {
            DomainError::ValidationErr(ValidationError::RateLimitExceeded { .. }) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
            DomainError::Otp(OtpError::Dispatch { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::Otp(_) => StatusCode::BAD_REQUEST,
            DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        } else {
            tracing::debug!(error = %self.error, "Request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let DomainError::ValidationErr(ValidationError::RateLimitExceeded { retry_after_secs }) =
            &self.error
        {
            builder.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
            return builder.json(ApiResponse {
                success: false,
                message: None,
                error: Some(self.public_message()),
                data: Some(serde_json::json!({ "retry_after": retry_after_secs })),
            });
        }

        builder.json(ApiResponse::error(self.public_message()))
    }
}

/// 400 response for a body that failed `validator` checks
pub fn validation_failed(errors: &ValidationErrors) -> ApiError {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string());

    ApiError::new(DomainError::Validation { message })
}

/// 500 for a delivery the provider declined
pub fn dispatch_failed(transport: impl Into<String>, reason: impl Into<String>) -> ApiError {
    ApiError::new(DomainError::Otp(OtpError::Dispatch {
        transport: transport.into(),
        reason: reason.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_failures_are_generic() {
        for err in [OtpError::NotFound, OtpError::Expired, OtpError::Mismatch] {
            let api = ApiError::new(DomainError::Otp(err));
            assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(api.public_message(), "Invalid OTP or expired");
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let api = ApiError::new(DomainError::storage("redis down at 10.0.0.3"));
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_dispatch_failure_message() {
        let api = dispatch_failed("sms", "provider said no");
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.public_message(), DISPATCH_FAILED_MESSAGE);
    }

    #[test]
    fn test_rate_limit_sets_retry_after() {
        let api = ApiError::new(DomainError::ValidationErr(ValidationError::RateLimitExceeded {
            retry_after_secs: 42,
        }));
        let response = api.error_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }
}
