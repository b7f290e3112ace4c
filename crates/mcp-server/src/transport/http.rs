//! HTTP transport for MCP

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use seo_api::ApiClient;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::Result;
use crate::protocol::{McpMessage, RequestHandler};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Shared state for HTTP handlers
struct AppState {
    handler: Mutex<RequestHandler>,
}

/// HTTP transport for MCP protocol
pub struct HttpTransport {
    client: ApiClient,
    host: String,
    port: u16,
}

impl HttpTransport {
    /// Create a new HTTP transport listening on all interfaces
    pub fn new(client: ApiClient, port: u16) -> Self {
        Self {
            client,
            host: "0.0.0.0".to_string(),
            port,
        }
    }

    /// Listen on a specific host instead of all interfaces
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Build the router serving `/health` and `/mcp`
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            handler: Mutex::new(RequestHandler::new(self.client.clone())),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(health))
            .route("/health", get(health))
            .route("/mcp", post(handle_mcp_request))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the HTTP server
    pub async fn run(&self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        info!("Starting MCP HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: tokio::net::TcpListener) -> Result<()> {
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Handle MCP JSON-RPC request via HTTP POST
async fn handle_mcp_request(
    State(state): State<Arc<AppState>>,
    Json(message): Json<McpMessage>,
) -> Response {
    debug!("HTTP request: {:?}", message.method);

    let mut handler = state.handler.lock().await;

    match handler.handle(message).await {
        Some(response) => Json(response).into_response(),
        // Notifications carry no response
        None => StatusCode::ACCEPTED.into_response(),
    }
}
