//! CLI error type

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything a command can fail with
///
/// Every variant is reported as one `Error: ...` line and exit code 1.
#[derive(Error, Debug)]
pub enum CliError {
    /// `{"error": ...}` returned by the API
    #[error("{0}")]
    Api(String),

    #[error("Malformed API response: missing '{0}'")]
    MalformedResponse(&'static str),

    #[error("File '{}' already exists. Use --force to overwrite.", .0.display())]
    FileExists(PathBuf),

    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("File '{}' is not valid JSON.", .0.display())]
    InvalidJson(PathBuf),

    #[error("Validation failed for '{}': {}", .path.display(), .errors.join("; "))]
    Validation { path: PathBuf, errors: Vec<String> },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid settings file '{}': {reason}", .path.display())]
    Settings { path: PathBuf, reason: String },

    #[error("This build does not include the '{0}' feature")]
    FeatureDisabled(&'static str),

    #[error(transparent)]
    Wallet(#[from] wallet_core::WalletError),

    #[error(transparent)]
    ToolSpec(#[from] tool_spec::ToolSpecError),

    #[error(transparent)]
    ApiSetup(#[from] seo_api::ApiError),

    #[cfg(feature = "agent-tools")]
    #[error(transparent)]
    Server(#[from] mcp_server::McpServerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
