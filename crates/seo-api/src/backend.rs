//! Backend abstraction for API calls

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::fmt;

/// Request parameters (query string for GET, JSON body for POST)
pub type Params = Map<String, Value>;

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Something that can answer aipseo API calls
///
/// Implementations never fail: errors come back as `{"error": message}`.
#[async_trait]
pub trait ApiBackend: Send + Sync {
    async fn call(&self, endpoint: &str, method: Method, params: Params) -> Value;
}

/// Build an `{"error": message}` value
pub fn error_value(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

/// Extract the message of an `{"error": ...}` value
pub fn error_message(value: &Value) -> Option<String> {
    let error = value.as_object()?.get("error")?;
    Some(match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
