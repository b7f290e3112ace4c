//! MCP request handler

use seo_api::ApiClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::types::*;
use crate::tools::{AgentToolProvider, ToolExecutor, ToolGenerator};

/// Name reported in `initialize`
pub const SERVER_NAME: &str = "aipseo MCP Server";

/// Answers MCP requests for one client session
pub struct RequestHandler {
    /// Tools advertised by `tools/list`, generated once
    tools: Vec<McpTool>,
    executor: ToolExecutor,
    initialized: bool,
}

impl RequestHandler {
    pub fn new(client: ApiClient) -> Self {
        Self {
            tools: ToolGenerator::new().generate_tools(&[&AgentToolProvider]),
            executor: ToolExecutor::new(client),
            initialized: false,
        }
    }

    /// Whether `initialize` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handle one incoming message; notifications and stray responses get no reply
    pub async fn handle(&mut self, message: McpMessage) -> Option<McpMessage> {
        let Some(method) = message.method.as_deref() else {
            debug!("Ignoring message without a method");
            return None;
        };
        let Some(id) = message.id.clone() else {
            self.notify(method);
            return None;
        };

        if message.jsonrpc != JSONRPC_VERSION {
            return Some(McpMessage::error_response(Some(id), McpError::invalid_request()));
        }

        debug!("Handling request: {}", method);
        let result = match method {
            "initialize" => self.initialize(message.params),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ToolsListResult {
                tools: self.tools.clone(),
            }),
            "tools/call" => self.call_tool(message.params).await,
            _ => Err(McpError::method_not_found()),
        };

        Some(match result {
            Ok(result) => McpMessage::response(id, result),
            Err(error) => McpMessage::error_response(Some(id), error),
        })
    }

    fn notify(&self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => info!("Client initialized"),
            "notifications/cancelled" => debug!("Request cancelled"),
            other => debug!("Unknown notification: {}", other),
        }
    }

    fn initialize(&mut self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = parse_params(params)?;
        info!(
            "Initializing session with client: {} v{}",
            params.client_info.name, params.client_info.version
        );
        self.initialized = true;

        to_result(InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::with_tools(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = parse_params(params)?;
        debug!("Calling tool: {}", params.name);

        let result = self
            .executor
            .execute(&params.name, params.arguments)
            .await
            .unwrap_or_else(|e| {
                error!("Tool execution failed: {}", e);
                ToolCallResult::error(e.to_string())
            });
        to_result(result)
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    let params = params.ok_or_else(|| McpError::invalid_params("Missing params"))?;
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(e.to_string()))
}

fn to_result<T: Serialize>(value: T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::internal_error(e.to_string()))
}
