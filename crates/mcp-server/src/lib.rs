//! # mcp-server
//!
//! MCP (Model Context Protocol) server exposing the aipseo agent tools.
//! Supports both stdio and HTTP transports.

mod error;
pub mod protocol;
mod server;
pub mod tools;
pub mod transport;

pub use error::{McpServerError, Result};
pub use protocol::{McpError, McpMessage, ServerCapabilities};
pub use server::{McpServer, ServerMode};
pub use tools::{agent_tools, AgentToolProvider, ToolExecutor, ToolGenerator};
pub use transport::{HttpTransport, StdioTransport, DEFAULT_PORT};
