//! OTP route handlers
//!
//! - `POST /api/v1/otp/send`: issue a code
//! - `POST /api/v1/otp/resend`: issue a fresh code, replacing the last one
//! - `POST /api/v1/otp/verify`: consume a code

pub mod resend;
pub mod send;
pub mod verify;

use actix_web::HttpResponse;
use std::sync::Arc;

use dl_core::repositories::otp::OtpStore;
use dl_core::services::otp::{IssueOutcome, OtpService};
use dl_core::services::RateLimiterTrait;
use dl_shared::types::ApiResponse;
use dl_shared::utils::identifier::mask_identifier;

use crate::handlers::{dispatch_failed, ApiError};

pub use resend::resend_otp;
pub use send::send_otp;
pub use verify::verify_otp;

/// Application state shared by the OTP handlers
pub struct AppState<S: OtpStore> {
    pub otp_service: Arc<OtpService<S>>,
    /// `None` disables rate limiting
    pub rate_limiter: Option<Arc<dyn RateLimiterTrait>>,
}

impl<S: OtpStore> AppState<S> {
    pub fn new(otp_service: Arc<OtpService<S>>, rate_limiter: Option<Arc<dyn RateLimiterTrait>>) -> Self {
        Self {
            otp_service,
            rate_limiter,
        }
    }

    pub(crate) fn limiter(&self) -> Option<&dyn RateLimiterTrait> {
        self.rate_limiter.as_deref()
    }
}

// The code stays stored after a failed delivery; the caller may resend
pub(crate) fn issued_response(outcome: IssueOutcome, message: &str) -> Result<HttpResponse, ApiError> {
    if outcome.is_delivered() {
        return Ok(HttpResponse::Ok().json(ApiResponse::message(message)));
    }

    tracing::warn!(
        identifier = %mask_identifier(&outcome.identifier),
        transport = %outcome.transport,
        info = %outcome.dispatch.info,
        "OTP issued but not delivered"
    );
    Err(dispatch_failed(outcome.transport.as_str(), outcome.dispatch.info))
}
