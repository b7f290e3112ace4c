//! Transport implementations for MCP server

mod http;
mod stdio;

pub use http::{HttpTransport, DEFAULT_PORT};
pub use stdio::StdioTransport;
