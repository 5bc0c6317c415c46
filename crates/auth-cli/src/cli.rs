//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Auth CLI - create and inspect sessions on the auth service.
#[derive(Debug, Parser)]
#[command(name = "auth-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Auth service URL (overrides config).
    #[arg(short, long, env = "AUTH_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Give up after this many seconds (overrides config).
    #[arg(
        short,
        long,
        env = "AUTH_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read the session behind a token.
    ReadSession {
        /// Session token.
        #[arg(long)]
        token: String,
    },

    /// Log in and print the resulting session.
    CreateSession(LoginArgs),

    /// Log in and print only the session token.
    CreateToken(LoginArgs),

    /// Create a session for another user, authorized by an existing token.
    Impersonate {
        /// Token of the acting session.
        #[arg(long)]
        token: String,

        /// User to impersonate.
        #[arg(long)]
        username: String,

        /// Read the new session back instead of printing only its token.
        #[arg(long)]
        read: bool,
    },

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Credentials for commands that log in.
#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Username (defaults to the configured username).
    #[arg(long)]
    pub username: Option<String>,

    /// Password (will prompt if not provided).
    #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Yubikey OTP, if the account requires one.
    #[arg(long)]
    pub yubikey: Option<String>,
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },
}
