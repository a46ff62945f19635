use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use dl_api::telemetry::init_tracing;
use dl_api::{create_app, AppState};
use dl_core::repositories::otp::{InMemoryOtpStore, OtpStore};
use dl_core::services::otp::{OtpService, OtpServiceConfig};
use dl_core::services::{InMemoryRateLimiter, RateLimiterTrait};
use dl_infra::{build_dispatcher, DatabasePool, MySqlOtpStore, RedisClient, RedisOtpStore};
use dl_shared::config::{AppConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.logging).context("failed to install tracing subscriber")?;

    tracing::info!(
        environment = %config.environment,
        store = %config.store.backend,
        "Starting Daemonlite API server"
    );

    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory OTP store; codes are lost on restart");
            run(config, InMemoryOtpStore::new()).await
        }
        StoreBackend::Redis => {
            let client = RedisClient::from_config(&config.store)
                .await
                .context("failed to connect to Redis")?;
            run(config, RedisOtpStore::new(client)).await
        }
        StoreBackend::Mysql => {
            let pool = DatabasePool::from_config(&config.store)
                .await
                .context("failed to connect to MySQL")?;
            run(config, MySqlOtpStore::new(pool.get_pool().clone())).await
        }
    }
}

async fn run<S: OtpStore + 'static>(config: AppConfig, store: S) -> anyhow::Result<()> {
    let dispatcher = build_dispatcher(&config).context("failed to configure notification transports")?;

    let service_config =
        OtpServiceConfig::from_settings(&config.otp, config.notifications.app_name.clone());
    service_config
        .validate()
        .context("invalid OTP settings")?;

    let otp_service = Arc::new(OtpService::new(Arc::new(store), Arc::new(dispatcher), service_config));

    let rate_limiter: Option<Arc<dyn RateLimiterTrait>> = if config.rate_limit.enabled {
        Some(Arc::new(InMemoryRateLimiter::new(
            config.rate_limit.max_requests,
            config.rate_limit.window_secs,
        )))
    } else {
        None
    };

    let state = web::Data::new(AppState::new(otp_service, rate_limiter));
    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let environment = config.environment;
    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), environment, &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}
