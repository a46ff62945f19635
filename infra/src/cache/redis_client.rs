//! Redis client implementation
//!
//! A multiplexed Redis connection with retry logic and the handful of
//! operations the OTP store needs: set with expiry, get, delete and an
//! atomic compare-and-delete.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult, Script};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use dl_shared::config::StoreConfig;
use dl_shared::identifier::mask_identifier;

use crate::InfrastructureError;

/// Upper bound for the exponential backoff between attempts
const MAX_BACKOFF_MS: u64 = 5000;

// Deletes KEYS[1] only while it still holds ARGV[1]
const COMPARE_AND_DELETE: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
end
return 0
"#;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with retry logic
///
/// Cloning is cheap and shares the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the store section of the application config
    pub async fn from_config(config: &StoreConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .redis_url
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("REDIS_URL is not set".to_string()))?;

        Self::new_with_retry_config(url, config.max_retries, config.retry_delay_ms).await
    }

    /// Connect to `url` with custom retry configuration
    ///
    /// # Arguments
    /// * `url` - Redis connection URL
    /// * `max_retries` - Maximum number of attempts, at least one is made
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        url: &str,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(url), "Creating Redis client");

        let client = Client::open(url).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = max_retries.max(1);
        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set `key` to `value`, expiring after `expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                let value = value.to_string();
                Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
            })
            .await;

        result.map_err(|e| {
            error!(key = %mask_key(key), error = %e, "Failed to set key");
            InfrastructureError::Cache(e)
        })
    }

    /// Get the value stored at `key`, `None` when absent
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await;

        result.map_err(|e| {
            error!(key = %mask_key(key), error = %e, "Failed to get key");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete `key`; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await;

        match result {
            Ok(deleted_count) => Ok(deleted_count > 0),
            Err(e) => {
                error!(key = %mask_key(key), error = %e, "Failed to delete key");
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Delete `key` only if it still holds exactly `expected`
    ///
    /// Runs as a single Lua script, so at most one caller can win for a
    /// given value.
    pub async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> Result<bool, InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                let expected = expected.to_string();
                Box::pin(async move {
                    Script::new(COMPARE_AND_DELETE)
                        .key(key)
                        .arg(expected)
                        .invoke_async::<_, u32>(&mut conn)
                        .await
                })
            })
            .await;

        match result {
            Ok(deleted_count) => Ok(deleted_count > 0),
            Err(e) => {
                error!(key = %mask_key(key), error = %e, "Failed to compare-and-delete key");
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Check connectivity with PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether `error` is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask the identifier part of a `prefix:identifier` key for logging
pub(crate) fn mask_key(key: &str) -> String {
    match key.split_once(':') {
        Some((prefix, rest)) => format!("{}:{}", prefix, mask_identifier(rest)),
        None => mask_identifier(key),
    }
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
