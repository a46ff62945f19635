//! Error handling for HTTP handlers

pub mod error;

pub use error::{dispatch_failed, validation_failed, ApiError};
