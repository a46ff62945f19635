//! Per-client rate limiting for OTP issuing endpoints

use actix_web::HttpRequest;

use dl_core::errors::{DomainError, ValidationError};
use dl_core::services::RateLimiterTrait;

use crate::handlers::ApiError;

/// Client IP, honouring reverse-proxy headers
pub fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next().map(str::trim) {
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.trim().to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Count the request against `scope` for this client
///
/// A limiter failure lets the request through.
pub async fn check_rate_limit(
    limiter: Option<&dyn RateLimiterTrait>,
    scope: &str,
    req: &HttpRequest,
) -> Result<(), ApiError> {
    let Some(limiter) = limiter else {
        return Ok(());
    };

    let client_ip = extract_client_ip(req);
    let key = format!("{}:{}", scope, client_ip);

    match limiter.check_and_record(&key).await {
        Ok(decision) if decision.allowed => Ok(()),
        Ok(decision) => {
            tracing::warn!(
                event = "otp_rate_limited",
                scope,
                client_ip = %client_ip,
                retry_after = decision.retry_after_secs,
                "Rate limit exceeded"
            );
            Err(ApiError::new(DomainError::ValidationErr(
                ValidationError::RateLimitExceeded {
                    retry_after_secs: decision.retry_after_secs,
                },
            )))
        }
        Err(e) => {
            tracing::error!(error = %e, "Rate limiter unavailable, allowing request");
            Ok(())
        }
    }
}
