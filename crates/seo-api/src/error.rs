//! Error types for API client setup
//!
//! Failures of individual API calls are not errors: backends return them as
//! `{"error": "..."}` values.

use thiserror::Error;

/// Result type alias for API client operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API client error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
