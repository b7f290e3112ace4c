//! Command handlers
//!
//! One module per command or command group. Handlers take the invocation
//! [`Context`] and never print outside of it.

pub mod init;
pub mod lookup;
pub mod market;
pub mod serve;
pub mod tool_spec;
pub mod validate;
pub mod wallet;

use serde_json::Value;
use tracing::debug;

use crate::cli::Command;
use crate::context::Context;
use crate::error::{CliError, Result};

/// Dispatch a parsed command to its handler
pub async fn execute(ctx: &mut Context, command: Command) -> Result<()> {
    debug!("Executing {:?}", command);
    match command {
        Command::Init { output, force } => init::run(ctx, &output, force).await,
        Command::Validate { file } => validate::run(ctx, &file).await,
        Command::Lookup { url } => lookup::lookup(ctx, &url).await,
        Command::SpamScore { url } => lookup::spam_score(ctx, &url).await,
        Command::Wallet { action } => wallet::run(ctx, action).await,
        Command::Market { action } => market::run(ctx, action).await,
        Command::ToolSpec { format } => tool_spec::run(ctx, &format),
        Command::Mcp { http, port } => serve::run(ctx, http, port).await,
    }
}

/// String field of an API response
fn str_field<'a>(response: &'a Value, key: &'static str) -> Result<&'a str> {
    response
        .get(key)
        .and_then(Value::as_str)
        .ok_or(CliError::MalformedResponse(key))
}

/// Numeric field of an API response
fn number_field(response: &Value, key: &'static str) -> Result<f64> {
    response
        .get(key)
        .and_then(Value::as_f64)
        .ok_or(CliError::MalformedResponse(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_fields() {
        let response = json!({"wallet_id": "w_1", "usd": 150});
        assert_eq!(str_field(&response, "wallet_id").unwrap(), "w_1");
        assert_eq!(number_field(&response, "usd").unwrap(), 150.0);

        let err = str_field(&response, "deposit_address").unwrap_err();
        assert_eq!(err.to_string(), "Malformed API response: missing 'deposit_address'");
        assert!(number_field(&response, "wallet_id").is_err());
    }
}
