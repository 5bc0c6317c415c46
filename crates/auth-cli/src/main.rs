//! # Auth CLI
//!
//! Command-line front end for the session service.

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]

use auth_cli::{
    cli::{Cli, Command},
    commands::{build_client, command_context, run_config, run_create_session, run_impersonate, run_read_session},
    config::CliConfig,
    output::{error, warning},
    CliResult,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, &mut config).await {
        if e.is_cancelled() {
            warning("Interrupted");
        }
        error(&e.to_string());
        std::process::exit(1);
    }
}

/// Dispatches one command.
async fn run(cli: Cli, config: &mut CliConfig) -> CliResult<()> {
    let format = cli.output.unwrap_or(config.output_format);

    if let Command::Config(cmd) = cli.command {
        return run_config(cmd, config);
    }

    let client = build_client(config, cli.endpoint.as_deref())?;
    let (ctx, cancel) = command_context(config, cli.timeout);

    // Ctrl-C cancels whatever request is in flight.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    match cli.command {
        Command::ReadSession { token } => run_read_session(&client, &ctx, &token, format).await,
        Command::CreateSession(login) => {
            run_create_session(&client, &ctx, login, config, format, false).await
        }
        Command::CreateToken(login) => {
            run_create_session(&client, &ctx, login, config, format, true).await
        }
        Command::Impersonate {
            token,
            username,
            read,
        } => run_impersonate(&client, &ctx, &token, &username, read, format).await,
        Command::Config(_) => Ok(()),
    }
}
