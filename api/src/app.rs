//! Application factory
//!
//! Builds the actix-web application around an [`AppState`].

use actix_web::{dev, error, web, App, HttpRequest, HttpResponse};
use tracing_actix_web::TracingLogger;

use dl_core::domain::value_objects::Transport;
use dl_core::repositories::otp::OtpStore;
use dl_shared::config::{Environment, ServerConfig};
use dl_shared::types::ApiResponse;

use crate::middleware::create_cors;
use crate::routes::otp::{resend_otp, send_otp, verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
    environment: Environment,
    server: &ServerConfig,
) -> App<
    impl dev::ServiceFactory<
        dev::ServiceRequest,
        Config = (),
        Response = dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().limit(16 * 1024).error_handler(json_error))
        .wrap(create_cors(environment, server))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<S>))
        .service(
            web::scope("/api/v1/otp")
                .route("/send", web::post().to(send_otp::<S>))
                .route("/resend", web::post().to(resend_otp::<S>))
                .route("/verify", web::post().to(verify_otp::<S>)),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check<S: OtpStore + 'static>(state: web::Data<AppState<S>>) -> HttpResponse {
    let transports: Vec<&str> = [Transport::Email, Transport::Sms]
        .into_iter()
        .filter(|t| state.otp_service.supports(*t))
        .map(|t| t.as_str())
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "daemonlite-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "transports": transports,
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("The requested resource was not found"))
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = HttpResponse::BadRequest().json(ApiResponse::error("Invalid request body"));
    error::InternalError::from_response(err, response).into()
}
