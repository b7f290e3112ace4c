//! Command-line definition

use clap::{Parser, Subcommand};
use seo_api::BackendKind;
use std::path::PathBuf;

use crate::commands::market::MarketAction;
use crate::commands::wallet::WalletAction;
use crate::output::OutputFormat;

/// Default manifest file of `init` and `validate`
pub const DEFAULT_MANIFEST: &str = "aipseo.json";

/// aipseo CLI tool for SEO operations
#[derive(Parser, Debug)]
#[command(name = "aipseo", about = "aipseo CLI tool for SEO operations")]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Show the version and exit
    #[arg(long)]
    pub version: bool,

    /// Settings file (default: settings.json in the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API backend (mock or http)
    #[arg(long, global = true, env = "AIPSEO_API_BACKEND")]
    pub backend: Option<BackendKind>,

    /// Base URL of the HTTP API backend
    #[arg(long, global = true, env = "AIPSEO_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Wallet password (prompted for when absent)
    #[arg(long, global = true, env = "AIPSEO_WALLET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new aipseo.json manifest file.
    Init {
        /// Output file path
        #[arg(long, default_value = DEFAULT_MANIFEST)]
        output: PathBuf,
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate an aipseo.json manifest file.
    Validate {
        /// Path to the manifest file
        #[arg(long, default_value = DEFAULT_MANIFEST)]
        file: PathBuf,
    },
    /// Look up SEO information for a URL.
    Lookup {
        /// URL to look up
        url: String,
    },
    /// Get the spam score for a URL.
    SpamScore {
        /// URL to check
        url: String,
    },
    /// Manage your aipseo wallet.
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
    /// Buy and sell backlinks on the marketplace.
    Market {
        #[command(subcommand)]
        action: MarketAction,
    },
    /// Emit a machine-readable tool specification.
    ToolSpec {
        /// Specification format
        #[arg(long, default_value = "openai")]
        format: String,
    },
    /// Run the MCP server exposing the agent tools.
    Mcp {
        /// Serve over HTTP instead of stdio
        #[arg(long)]
        http: bool,
        /// Port of the HTTP server
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

impl Command {
    /// Whether this command owns stdout for a protocol stream
    pub fn is_stdio_server(&self) -> bool {
        matches!(self, Command::Mcp { http: false, .. })
    }
}

/// Version line printed by `--version`
pub fn version_line() -> String {
    format!("aipseo CLI version: {}", env!("CARGO_PKG_VERSION"))
}
