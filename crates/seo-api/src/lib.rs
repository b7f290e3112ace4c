//! # seo-api
//!
//! Client for the aipseo SEO and backlink marketplace API.
//!
//! Calls go through an [`ApiBackend`]: either the in-process
//! [`MockBackend`] or the remote [`HttpBackend`], selected by [`ApiConfig`].
//! Call failures are returned as `{"error": message}` values rather than
//! Rust errors.

mod backend;
mod client;
mod config;
mod error;
mod http;
mod ids;
mod mock;

pub use backend::{error_message, error_value, ApiBackend, Method, Params};
pub use client::{ApiClient, NewListing, SearchFilters};
pub use config::{ApiConfig, BackendKind, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{ApiError, ApiResult};
pub use http::HttpBackend;
pub use ids::{generate_id, random_id};
pub use mock::{risk_level, MockBackend, RecordedCall};
