//! Redis cache module
//!
//! Provides the Redis client and the Redis-backed OTP store.

pub mod otp_store;
pub mod redis_client;

pub use otp_store::{RedisOtpStore, EXPIRED_RECORD_GRACE_SECS, OTP_KEY_PREFIX};
pub use redis_client::RedisClient;

#[cfg(test)]
mod tests;
