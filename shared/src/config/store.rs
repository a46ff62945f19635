//! OTP store back-end configuration

use serde::{Deserialize, Serialize};

/// Which persistence back-end holds OTP records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; records are lost on restart
    #[default]
    Memory,
    /// Redis, one key per identifier
    Redis,
    /// MySQL `otp_codes` table
    Mysql,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Mysql => write!(f, "mysql"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "mysql" | "database" => Ok(StoreBackend::Mysql),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Redis connection URL, required for the redis back-end
    #[serde(default)]
    pub redis_url: Option<String>,

    /// MySQL connection URL, required for the mysql back-end
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum pooled MySQL connections
    pub max_connections: u32,

    /// Attempts for retriable Redis commands
    pub max_retries: u32,

    /// Base delay between Redis retries in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            redis_url: None,
            database_url: None,
            max_connections: 10,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("Redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert_eq!("mysql".parse::<StoreBackend>().unwrap(), StoreBackend::Mysql);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }
}
