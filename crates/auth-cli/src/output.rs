//! Output formatting utilities.

use auth_client::SessionData;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Session representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SessionDisplay {
    /// Session token.
    pub token: String,
    /// Username.
    pub username: String,
    /// Factors, comma-separated.
    pub factors: String,
    /// Groups, comma-separated.
    #[tabled(rename = "groups")]
    pub group_memberships: String,
}

impl From<&SessionData> for SessionDisplay {
    fn from(session: &SessionData) -> Self {
        Self {
            token: session.token.clone(),
            username: session.username.clone(),
            factors: session.factors.join(","),
            group_memberships: session
                .group_memberships
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Renders a session in the given format.
pub fn render_session(session: &SessionData, format: OutputFormat) -> crate::CliResult<String> {
    let rendered = match format {
        OutputFormat::Table => {
            let row = SessionDisplay::from(session);
            Table::new([row]).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(session)?,
        OutputFormat::Quiet => session.username.clone(),
    };
    Ok(rendered)
}

/// Outputs a session.
pub fn output_session(session: &SessionData, format: OutputFormat) -> crate::CliResult<()> {
    println!("{}", render_session(session, format)?);
    Ok(())
}

/// Outputs a bare token.
pub fn output_token(token: &str, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({ "token": token }))?;
            println!("{json}");
        }
        OutputFormat::Table | OutputFormat::Quiet => println!("{token}"),
    }
    Ok(())
}

/// Prompts for password input (hidden).
pub fn prompt_password(prompt: &str) -> crate::CliResult<String> {
    rpassword::prompt_password(prompt).map_err(crate::CliError::Io)
}
