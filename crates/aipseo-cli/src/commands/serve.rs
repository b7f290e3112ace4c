//! `aipseo mcp`

use crate::context::Context;
use crate::error::Result;

#[cfg(feature = "agent-tools")]
pub async fn run(ctx: &mut Context, http: bool, port: u16) -> Result<()> {
    use mcp_server::{McpServer, ServerMode};

    let mode = if http {
        ServerMode::Http { port }
    } else {
        ServerMode::Stdio
    };

    if http {
        ctx.output
            .line(format!("Starting MCP server on http://localhost:{}", port))?;
    }

    McpServer::new(ctx.api.clone()).with_mode(mode).run().await?;
    Ok(())
}

#[cfg(not(feature = "agent-tools"))]
pub async fn run(_ctx: &mut Context, _http: bool, _port: u16) -> Result<()> {
    Err(crate::error::CliError::FeatureDisabled("agent-tools"))
}
