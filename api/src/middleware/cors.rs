//! CORS configuration
//!
//! Development allows any origin. Staging and production allow only the
//! origins listed in `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use dl_shared::config::{Environment, ServerConfig};

/// Max age for preflight caching, in seconds
const PREFLIGHT_MAX_AGE: usize = 3600;

pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(PREFLIGHT_MAX_AGE);

    if !environment.is_production() && server.allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }

    server
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn preflight(environment: Environment, origins: Vec<String>, origin: &str) -> u16 {
        let server = ServerConfig {
            allowed_origins: origins,
            ..ServerConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(environment, &server))
                .route("/ping", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        test::call_service(&app, req).await.status().as_u16()
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        assert_eq!(preflight(Environment::Development, vec![], "http://localhost:3000").await, 200);
    }

    #[actix_web::test]
    async fn test_production_restricts_origins() {
        let origins = vec!["https://app.daemonlite.com".to_string()];

        assert_eq!(
            preflight(Environment::Production, origins.clone(), "https://app.daemonlite.com").await,
            200
        );
        assert_eq!(preflight(Environment::Production, origins, "https://evil.example").await, 400);
    }
}
