//! Configuration management commands.

use std::path::Path;

use crate::cli::ConfigCommand;
use crate::config::OutputFormat;
use crate::output::{info, success};
use crate::CliConfig;

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;
    match cmd {
        ConfigCommand::Show => show_config(config, &config_path),
        ConfigCommand::Set { key, value } => {
            apply_setting(config, &key, &value)?;
            config.save_to(&config_path)?;
            success(&format!("Set {} = {}", key, value));
            Ok(())
        }
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig, config_path: &Path) -> crate::CliResult<()> {
    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("endpoint: {}", config.endpoint);

    if let Some(timeout) = config.timeout_secs {
        println!("timeout_secs: {}", timeout);
    }

    if let Some(username) = &config.default_username {
        println!("default_username: {}", username);
    }

    println!("output_format: {:?}", config.output_format);
    Ok(())
}

/// Sets a configuration value in memory.
fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> crate::CliResult<()> {
    match key {
        "endpoint" | "server" => {
            // Reject endpoints the client would refuse later.
            auth_client::Endpoint::parse(value)?;
            config.endpoint = value.to_string();
        }
        "timeout_secs" | "timeout" => {
            config.timeout_secs = if value.is_empty() || value == "none" {
                None
            } else {
                Some(parse_timeout(value)?)
            };
        }
        "default_username" | "username" => {
            if value.is_empty() || value == "none" {
                config.default_username = None;
            } else {
                config.default_username = Some(value.to_string());
            }
        }
        "output_format" | "output" => {
            config.output_format = match value.to_lowercase().as_str() {
                "table" => OutputFormat::Table,
                "json" => OutputFormat::Json,
                "quiet" => OutputFormat::Quiet,
                _ => {
                    return Err(crate::CliError::InvalidArgument(format!(
                        "Unknown output format: {}. Supported: table, json, quiet",
                        value
                    )));
                }
            };
        }
        _ => {
            return Err(crate::CliError::InvalidArgument(format!(
                "Unknown configuration key: {}. Known keys: endpoint, timeout_secs, default_username, output_format",
                key
            )));
        }
    }
    Ok(())
}

/// Parses a timeout in whole seconds; zero would expire before any request.
fn parse_timeout(value: &str) -> crate::CliResult<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(crate::CliError::InvalidArgument(format!(
            "timeout must be a positive whole number of seconds, got: {}",
            value
        ))),
    }
}
