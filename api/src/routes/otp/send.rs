use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use dl_core::repositories::otp::OtpStore;

use super::{issued_response, AppState};
use crate::dto::SendOtpRequest;
use crate::handlers::{validation_failed, ApiError};
use crate::middleware::check_rate_limit;

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// { "email": "jane@example.com", "purpose": "verification", "transport": "email" }
/// ```
///
/// # Responses
/// - 200 `{"success": true, "message": "OTP sent successfully"}`
/// - 400 invalid identifier, purpose or transport
/// - 429 too many requests from this client
/// - 500 `{"success": false, "error": "Failed to send OTP"}`
pub async fn send_otp<S: OtpStore + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<S>>,
    body: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    check_rate_limit(state.limiter(), "otp_send", &req).await?;

    let body = body.into_inner();
    body.validate().map_err(|e| validation_failed(&e))?;

    let outcome = state.otp_service.issue(body.into_issue_request()?).await?;
    issued_response(outcome, "OTP sent successfully")
}
