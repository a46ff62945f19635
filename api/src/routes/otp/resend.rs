use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use dl_core::repositories::otp::OtpStore;

use super::{issued_response, AppState};
use crate::dto::SendOtpRequest;
use crate::handlers::{validation_failed, ApiError};
use crate::middleware::check_rate_limit;

/// Handler for POST /api/v1/otp/resend
///
/// Same body and responses as send; any earlier code for the identifier
/// stops working.
pub async fn resend_otp<S: OtpStore + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<S>>,
    body: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    check_rate_limit(state.limiter(), "otp_resend", &req).await?;

    let body = body.into_inner();
    body.validate().map_err(|e| validation_failed(&e))?;

    let outcome = state.otp_service.resend(body.into_issue_request()?).await?;
    issued_response(outcome, "OTP resent successfully")
}
