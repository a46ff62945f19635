//! # Daemonlite API
//!
//! HTTP surface for the OTP subsystem: send, resend and verify endpoints,
//! a health check, CORS and request tracing.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::otp::AppState;
