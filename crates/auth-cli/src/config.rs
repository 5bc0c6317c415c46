//! CLI configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service used when neither the config file nor the command line names one.
pub const DEFAULT_ENDPOINT: &str = "https://auth.bytemark.co.uk";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the auth service (e.g., https://auth.example.com).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-operation timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Username to use when none is given on the command line.
    pub default_username: Option<String>,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Default endpoint.
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
            default_username: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default file.
    ///
    /// Without a home directory there is no default file, so defaults are
    /// used and a warning is printed.
    pub fn load() -> crate::CliResult<Self> {
        Self::load_or_default(Self::config_path())
    }

    /// Loads from `path` when one was resolved, otherwise falls back to defaults.
    fn load_or_default(path: crate::CliResult<PathBuf>) -> crate::CliResult<Self> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                crate::output::warning(&format!("{e}; using default configuration"));
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from `path`, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> crate::CliResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content).map_err(|e| {
                crate::CliError::Config(format!("failed to parse config: {e}"))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> crate::CliResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::CliError::Config(format!("failed to serialize config: {e}"))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Gets the configuration file path.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| {
            crate::CliError::Config("could not determine home directory".to_string())
        })?;
        Ok(home.join(".bytemark").join("auth.toml"))
    }

    /// Gets the effective endpoint (from args or config).
    pub fn effective_endpoint(&self, arg_endpoint: Option<&str>) -> String {
        arg_endpoint
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.endpoint.clone())
    }

    /// Gets the effective username (from args or config).
    pub fn effective_username(&self, arg_username: Option<&str>) -> Option<String> {
        arg_username
            .map(|s| s.to_string())
            .or_else(|| self.default_username.clone())
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Quiet (tokens and usernames only).
    Quiet,
}
