//! Error types for tool spec generation

use thiserror::Error;

/// Result type alias for tool spec operations
pub type ToolSpecResult<T> = std::result::Result<T, ToolSpecError>;

/// Tool spec error types
#[derive(Error, Debug)]
pub enum ToolSpecError {
    /// A group of tools could not be loaded. Generation skips the group.
    #[error("Tool group '{group}' is unavailable: {reason}")]
    Unavailable { group: String, reason: String },

    #[error("Unsupported format '{0}'")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
