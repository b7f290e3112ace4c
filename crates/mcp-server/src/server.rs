//! Main MCP server orchestration

use seo_api::ApiClient;
use tracing::info;

use crate::error::Result;
use crate::transport::{HttpTransport, StdioTransport};

/// Server mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    /// stdio transport (for desktop agent hosts)
    #[default]
    Stdio,
    /// HTTP transport
    Http { port: u16 },
}

/// MCP server
pub struct McpServer {
    client: ApiClient,
    mode: ServerMode,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            mode: ServerMode::default(),
        }
    }

    /// Set the server mode
    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configured server mode
    pub fn mode(&self) -> ServerMode {
        self.mode
    }

    /// Run the server
    pub async fn run(&self) -> Result<()> {
        match self.mode {
            ServerMode::Stdio => {
                info!("Starting MCP server in stdio mode");
                let mut transport = StdioTransport::new(self.client.clone());
                transport.run().await
            }
            ServerMode::Http { port } => {
                info!("Starting MCP server in HTTP mode on port {}", port);
                let transport = HttpTransport::new(self.client.clone(), port);
                transport.run().await
            }
        }
    }
}
