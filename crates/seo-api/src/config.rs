//! Backend selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::backend::ApiBackend;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpBackend;
use crate::mock::MockBackend;

/// Default base URL of the aipseo API
pub const DEFAULT_BASE_URL: &str = "https://api.aipseo.com/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which backend answers API calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Mock,
    Http,
}

impl FromStr for BackendKind {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "http" => Ok(Self::Http),
            other => Err(ApiError::InvalidConfig(format!(
                "unknown backend '{}', expected 'mock' or 'http'",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub backend: BackendKind,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Build the configured backend
    pub fn build_backend(&self) -> ApiResult<Arc<dyn ApiBackend>> {
        debug!("Using {} API backend", self.backend);
        match self.backend {
            BackendKind::Mock => Ok(Arc::new(MockBackend::new())),
            BackendKind::Http => Ok(Arc::new(HttpBackend::new(
                self.base_url.clone(),
                Duration::from_secs(self.timeout_secs),
            )?)),
        }
    }
}
