//! aipseo - command-line tool for SEO operations and the backlink marketplace

use clap::{CommandFactory, Parser};
use seo_api::ApiClient;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aipseo_cli::cli::version_line;
use aipseo_cli::{Cli, Context, FixedPassword, Output, OutputFormat, Overrides, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_line());
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        // Help goes to stdout; nothing useful can be done if that fails
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    // Logging would corrupt the protocol stream of the stdio MCP server
    if !command.is_stdio_server() {
        let default_level = if cli.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let overrides = Overrides {
        backend: cli.backend,
        base_url: cli.api_base_url,
    };
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings.apply(&overrides),
        Err(e) => return fail(cli.format, e),
    };

    let backend = match settings.api.build_backend() {
        Ok(backend) => backend,
        Err(e) => return fail(cli.format, e),
    };
    debug!("Using {} backend", settings.api.backend);

    let mut ctx = Context::new(cli.format, ApiClient::new(backend), settings);
    if let Some(password) = cli.password {
        ctx = ctx.with_prompt(FixedPassword::new(password));
    }

    match aipseo_cli::run(&mut ctx, command).await {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn fail(format: OutputFormat, error: impl std::fmt::Display) -> ExitCode {
    Output::stdio(format).error(error);
    ExitCode::FAILURE
}
