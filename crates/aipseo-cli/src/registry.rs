//! Tool descriptors of the CLI commands
//!
//! Top-level commands are named after the command, grouped subcommands
//! `<group>_<command>`. The agent tools follow when the `agent-tools`
//! feature is enabled.

use tool_spec::{ParamType, StaticTools, ToolDescriptor, ToolParam, ToolProvider};
use wallet_core::DEFAULT_WALLET_PATH;

use crate::cli::DEFAULT_MANIFEST;

fn path() -> ParamType {
    ParamType::Other("PathBuf".into())
}

fn wallet_param() -> ToolParam {
    ToolParam::with_default("wallet", path(), DEFAULT_WALLET_PATH).describe("Path to wallet file")
}

/// Top-level commands
pub fn cli_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("init", "Initialize a new aipseo.json manifest file.")
            .param(
                ToolParam::with_default("output", path(), DEFAULT_MANIFEST)
                    .describe("Output file path"),
            )
            .param(
                ToolParam::with_default("force", ParamType::Bool, false)
                    .describe("Overwrite existing file"),
            ),
        ToolDescriptor::new("validate", "Validate an aipseo.json manifest file.").param(
            ToolParam::with_default("file", path(), DEFAULT_MANIFEST)
                .describe("Path to the manifest file"),
        ),
        ToolDescriptor::new("lookup", "Look up SEO information for a URL.")
            .param(ToolParam::required("url", ParamType::String).describe("URL to look up")),
        ToolDescriptor::new("spam-score", "Get the spam score for a URL.")
            .param(ToolParam::required("url", ParamType::String).describe("URL to check")),
        ToolDescriptor::new("tool-spec", "Emit a machine-readable tool specification.").param(
            ToolParam::with_default("format", ParamType::String, "openai")
                .describe("Specification format"),
        ),
        ToolDescriptor::new("mcp", "Run the MCP server exposing the agent tools.")
            .param(
                ToolParam::with_default("http", ParamType::Bool, false)
                    .describe("Serve over HTTP instead of stdio"),
            )
            .param(
                ToolParam::with_default("port", ParamType::Int, 8000)
                    .describe("Port of the HTTP server"),
            ),
    ]
}

/// `wallet` subcommands
pub fn wallet_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("wallet_create", "Create a new aipseo wallet.")
            .param(ToolParam::optional("name", ParamType::String).describe("Name for the wallet"))
            .param(
                ToolParam::with_default("output", path(), DEFAULT_WALLET_PATH)
                    .describe("Output file path for the wallet"),
            )
            .param(
                ToolParam::with_default("force", ParamType::Bool, false)
                    .describe("Overwrite existing wallet file"),
            ),
        ToolDescriptor::new("wallet_balance", "Check the balance of your wallet.")
            .param(wallet_param()),
        ToolDescriptor::new("wallet_deposit", "Deposit funds into your wallet.")
            .param(wallet_param())
            .param(
                ToolParam::required("amount", ParamType::Float).describe("Amount to deposit in USD"),
            )
            .param(
                ToolParam::with_default("no_browser", ParamType::Bool, false)
                    .describe("Print the checkout URL without opening a browser"),
            ),
        ToolDescriptor::new("wallet_withdraw", "Withdraw funds from your wallet.")
            .param(wallet_param())
            .param(
                ToolParam::required("amount", ParamType::Float)
                    .describe("Amount to withdraw in USD"),
            )
            .param(ToolParam::required("dest", ParamType::String).describe("Destination account")),
    ]
}

/// `market` subcommands
pub fn market_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("market_list", "List available backlinks on the marketplace.")
            .param(ToolParam::optional("dr_min", ParamType::Int).describe("Minimum domain rating"))
            .param(
                ToolParam::optional("price_max", ParamType::Float).describe("Maximum price in USD"),
            )
            .param(ToolParam::optional("topic", ParamType::String).describe("Topic to filter by")),
        ToolDescriptor::new("market_buy", "Buy a backlink from the marketplace.")
            .param(wallet_param())
            .param(
                ToolParam::required("listing_id", ParamType::String)
                    .describe("ID of the listing to buy"),
            ),
        ToolDescriptor::new("market_sell", "List a backlink for sale on the marketplace.")
            .param(wallet_param())
            .param(
                ToolParam::required("source_url", ParamType::String)
                    .describe("URL of the page containing the backlink"),
            )
            .param(
                ToolParam::required("target_url", ParamType::String)
                    .describe("URL the backlink points to"),
            )
            .param(ToolParam::required("price", ParamType::Float).describe("Price in USD"))
            .param(
                ToolParam::optional("anchor", ParamType::String)
                    .describe("Anchor text for the backlink"),
            )
            .param(
                ToolParam::optional("rel", ParamType::String)
                    .describe("Rel attribute for the backlink (e.g. nofollow)"),
            ),
    ]
}

/// Every tool group, in emission order
pub fn providers() -> Vec<Box<dyn ToolProvider>> {
    vec![
        Box::new(StaticTools::new("cli", cli_tools())),
        Box::new(StaticTools::new("wallet", wallet_tools())),
        Box::new(StaticTools::new("market", market_tools())),
        agent_provider(),
    ]
}

#[cfg(feature = "agent-tools")]
fn agent_provider() -> Box<dyn ToolProvider> {
    Box::new(mcp_server::AgentToolProvider)
}

#[cfg(not(feature = "agent-tools"))]
fn agent_provider() -> Box<dyn ToolProvider> {
    Box::new(tool_spec::UnavailableTools::new(
        "agent",
        "built without the agent-tools feature",
    ))
}
