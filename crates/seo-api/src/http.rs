//! HTTP backend for the aipseo API

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::backend::{error_value, ApiBackend, Method, Params};
use crate::error::{ApiError, ApiResult};

/// Backend that forwards calls to a remote aipseo API
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Create a backend for `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn send(&self, endpoint: &str, method: Method, params: &Params) -> reqwest::Result<Value> {
        let url = self.endpoint_url(endpoint);
        debug!("API request: {} {}", method, url);

        let request = match method {
            Method::Get => self.client.get(&url).query(&query_pairs(params)),
            Method::Post => self.client.post(&url).json(params),
        };

        let response = request.send().await?.error_for_status()?;
        debug!("API response status: {}", response.status());

        response.json::<Value>().await
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    async fn call(&self, endpoint: &str, method: Method, params: Params) -> Value {
        match self.send(endpoint, method, &params).await {
            Ok(value) => value,
            Err(e) => {
                debug!("API request to {} failed: {}", endpoint, e);
                error_value(format!("API request failed: {}", e))
            }
        }
    }
}

/// Flatten parameters into query string pairs
fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_api() -> String {
        let app = Router::new()
            .route(
                "/v1/lookup",
                get(|Query(query): Query<HashMap<String, String>>| async move {
                    Json(json!({ "url": query.get("url"), "domain_authority": 12 }))
                }),
            )
            .route(
                "/v1/wallet/create",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "wallet_id": "w_remote", "echo": body }))
                }),
            )
            .route(
                "/v1/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/v1/", addr)
    }

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = HttpBackend::new("ftp://api.aipseo.com", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn test_endpoint_url() {
        let backend = HttpBackend::new("https://api.aipseo.com/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url(), "https://api.aipseo.com/v1");
        assert_eq!(
            backend.endpoint_url("wallet/balance"),
            "https://api.aipseo.com/v1/wallet/balance"
        );
    }

    #[test]
    fn test_query_pairs() {
        let pairs = query_pairs(&params(json!({
            "dr_min": 40,
            "price_max": 60.5,
            "topic": "seo",
            "skip": null
        })));
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&("dr_min".to_string(), "40".to_string())));
        assert!(pairs.contains(&("price_max".to_string(), "60.5".to_string())));
        assert!(pairs.contains(&("topic".to_string(), "seo".to_string())));
    }

    #[tokio::test]
    async fn test_get_sends_query() {
        let base = spawn_api().await;
        let backend = HttpBackend::new(base, Duration::from_secs(5)).unwrap();

        let response = backend
            .call("lookup", Method::Get, params(json!({"url": "example.com"})))
            .await;
        assert_eq!(response["url"], "example.com");
        assert_eq!(response["domain_authority"], 12);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let base = spawn_api().await;
        let backend = HttpBackend::new(base, Duration::from_secs(5)).unwrap();

        let response = backend
            .call("wallet/create", Method::Post, params(json!({"name": "main"})))
            .await;
        assert_eq!(response["wallet_id"], "w_remote");
        assert_eq!(response["echo"]["name"], "main");
    }

    #[tokio::test]
    async fn test_failures_become_error_values() {
        let base = spawn_api().await;
        let backend = HttpBackend::new(base, Duration::from_secs(5)).unwrap();

        let response = backend.call("broken", Method::Get, Params::new()).await;
        let message = response["error"].as_str().unwrap();
        assert!(message.starts_with("API request failed:"));
        assert!(message.contains("500"));

        let response = backend.call("missing", Method::Get, Params::new()).await;
        assert!(response["error"].as_str().unwrap().contains("404"));
    }
}
