//! # aipseo-cli
//!
//! The `aipseo` command-line tool: SEO lookups, encrypted wallets, the
//! backlink marketplace, tool specs for AI agents and an MCP server.
//!
//! Handlers run against a [`Context`] so they can be driven from tests
//! with a mock API backend and captured output.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod registry;

pub use cli::{Cli, Command};
pub use commands::execute;
pub use config::{Overrides, Settings};
pub use context::{Browser, Context, FixedPassword, PasswordPrompt, RecordingBrowser};
pub use error::{CliError, Result};
pub use output::{Captured, Output, OutputFormat};

/// Run a command, reporting failure as one `Error: ...` line
///
/// Returns the process exit code.
pub async fn run(ctx: &mut Context, command: Command) -> i32 {
    match execute(ctx, command).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            ctx.output.error(&e);
            1
        }
    }
}
