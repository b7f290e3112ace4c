//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP server operations
pub type Result<T> = std::result::Result<T, McpServerError>;

/// MCP server error types
#[derive(Error, Debug)]
pub enum McpServerError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
