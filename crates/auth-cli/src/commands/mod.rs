//! Command implementations.

pub mod config;
pub mod session;

pub use config::run_config;
pub use session::{run_create_session, run_impersonate, run_read_session};

use std::time::Duration;

use auth_client::{CancelHandle, Client, ClientConfig, Context};

use crate::CliConfig;

/// Builds the session client from config and command-line overrides.
pub fn build_client(config: &CliConfig, endpoint_override: Option<&str>) -> crate::CliResult<Client> {
    let endpoint = config.effective_endpoint(endpoint_override);
    let client = Client::with_config(&endpoint, &ClientConfig::default())?;
    tracing::debug!(endpoint = %client.endpoint(), "session client ready");
    Ok(client)
}

/// Builds the context for one command.
///
/// The handle is meant for the Ctrl-C listener; the deadline comes from
/// `--timeout` or the configured `timeout_secs`.
pub fn command_context(config: &CliConfig, timeout_override: Option<u64>) -> (Context, CancelHandle) {
    let (ctx, handle) = Context::with_cancel();
    match timeout_override.or(config.timeout_secs) {
        Some(secs) => (ctx.child_with_timeout(Duration::from_secs(secs)), handle),
        None => (ctx, handle),
    }
}
