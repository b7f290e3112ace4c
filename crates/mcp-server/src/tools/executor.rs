//! Execute agent tools against the aipseo API

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use seo_api::{error_message, ApiClient, SearchFilters};
use tracing::debug;

use super::catalog::{
    GET_SPAM_SCORE, GET_URL_LOOKUP, GET_WALLET_BALANCE, LIST_MARKET_OPPORTUNITIES,
};
use crate::error::{McpServerError, Result};
use crate::protocol::ToolCallResult;

#[derive(Debug, Deserialize)]
struct UrlArgs {
    url: String,
}

#[derive(Debug, Deserialize)]
struct MarketArgs {
    dr_min: Option<i64>,
    price_max: Option<f64>,
    topic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WalletArgs {
    wallet_id: String,
}

/// Executor for agent tools
pub struct ToolExecutor {
    client: ApiClient,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Execute a tool by name
    ///
    /// API failures are returned as error results; unknown tools and bad
    /// arguments are errors.
    pub async fn execute(&self, tool_name: &str, arguments: Option<Value>) -> Result<ToolCallResult> {
        debug!("Executing tool: {}", tool_name);

        let response = match tool_name {
            GET_URL_LOOKUP => {
                let args: UrlArgs = parse_args(tool_name, arguments)?;
                self.client.lookup(&args.url).await
            }
            GET_SPAM_SCORE => {
                let args: UrlArgs = parse_args(tool_name, arguments)?;
                self.client.spam_score(&args.url).await
            }
            LIST_MARKET_OPPORTUNITIES => {
                let args: MarketArgs = parse_args(tool_name, arguments)?;
                let filters = SearchFilters {
                    dr_min: args.dr_min,
                    price_max: args.price_max,
                    topic: args.topic,
                };
                self.client.search_marketplace(&filters).await
            }
            GET_WALLET_BALANCE => {
                let args: WalletArgs = parse_args(tool_name, arguments)?;
                self.client.get_balance(&args.wallet_id).await
            }
            other => return Err(McpServerError::UnknownTool(other.to_string())),
        };

        if let Some(message) = error_message(&response) {
            debug!("Tool {} failed: {}", tool_name, message);
            return Ok(ToolCallResult::error(message));
        }

        Ok(ToolCallResult::text(serde_json::to_string_pretty(&response)?))
    }
}

/// Deserialize tool arguments; missing arguments are an empty object
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Option<Value>) -> Result<T> {
    let arguments = match arguments {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    };

    serde_json::from_value(arguments).map_err(|e| McpServerError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_api::{Method, MockBackend};
    use serde_json::json;
    use std::sync::Arc;

    fn executor() -> (Arc<MockBackend>, ToolExecutor) {
        let mock = Arc::new(MockBackend::seeded(21));
        (mock.clone(), ToolExecutor::new(ApiClient::new(mock)))
    }

    #[tokio::test]
    async fn test_url_lookup() {
        let (mock, executor) = executor();
        let result = executor
            .execute(GET_URL_LOOKUP, Some(json!({"url": "example.com"})))
            .await
            .unwrap();

        assert!(!result.is_error());
        let body: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
        assert_eq!(body["url"], "example.com");
        assert_eq!(mock.last_call().unwrap().endpoint, "lookup");
    }

    #[tokio::test]
    async fn test_market_opportunities_without_arguments() {
        let (mock, executor) = executor();
        let result = executor
            .execute(LIST_MARKET_OPPORTUNITIES, None)
            .await
            .unwrap();

        let body: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
        assert!(body.is_array());

        let call = mock.last_call().unwrap();
        assert_eq!(call.endpoint, "marketplace/search");
        assert_eq!(call.method, Method::Get);
        assert!(call.params.is_empty());
    }

    #[tokio::test]
    async fn test_market_opportunities_with_filters() {
        let (mock, executor) = executor();
        executor
            .execute(
                LIST_MARKET_OPPORTUNITIES,
                Some(json!({"dr_min": 30, "topic": "seo", "price_max": null})),
            )
            .await
            .unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(Value::Object(call.params), json!({"dr_min": 30, "topic": "seo"}));
    }

    #[tokio::test]
    async fn test_wallet_balance() {
        let (_, executor) = executor();
        let result = executor
            .execute(GET_WALLET_BALANCE, Some(json!({"wallet_id": "w_1"})))
            .await
            .unwrap();

        let body: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
        assert_eq!(body["wallet_id"], "w_1");
    }

    #[tokio::test]
    async fn test_api_error_becomes_error_result() {
        let mock = Arc::new(
            MockBackend::seeded(0).with_response("spam-score", json!({"error": "rate limited"})),
        );
        let executor = ToolExecutor::new(ApiClient::new(mock));

        let result = executor
            .execute(GET_SPAM_SCORE, Some(json!({"url": "a.com"})))
            .await
            .unwrap();
        assert!(result.is_error());
        assert_eq!(result.first_text(), Some("rate limited"));
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let (_, executor) = executor();
        let err = executor.execute(GET_URL_LOOKUP, None).await.unwrap_err();
        assert!(matches!(err, McpServerError::InvalidArguments { .. }));
        assert!(err.to_string().contains("url"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (_, executor) = executor();
        let err = executor.execute("analyze_seo_content", None).await.unwrap_err();
        assert!(matches!(err, McpServerError::UnknownTool(ref name) if name == "analyze_seo_content"));
    }
}
