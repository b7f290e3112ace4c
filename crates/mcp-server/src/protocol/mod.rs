//! MCP protocol types and request handling

mod handler;
mod types;

pub use handler::RequestHandler;
pub use types::*;
