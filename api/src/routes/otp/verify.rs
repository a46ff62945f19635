use actix_web::{web, HttpResponse};
use validator::Validate;

use dl_core::errors::DomainError;
use dl_core::repositories::otp::OtpStore;
use dl_shared::types::ApiResponse;

use super::AppState;
use crate::dto::VerifyOtpRequest;
use crate::handlers::{validation_failed, ApiError};

/// Handler for POST /api/v1/otp/verify
///
/// Every failure (unknown identifier, wrong code, expired code, wrong
/// purpose) answers 400 with the same message.
pub async fn verify_otp<S: OtpStore + 'static>(
    state: web::Data<AppState<S>>,
    body: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(|e| validation_failed(&e))?;

    let purpose = body.parsed_purpose()?;
    let outcome = state
        .otp_service
        .verify(&body.identifier, &body.code, purpose)
        .await?;

    outcome.into_result().map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("OTP verified successfully")))
}
