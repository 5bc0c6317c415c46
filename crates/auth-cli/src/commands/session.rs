//! Session commands.

use auth_client::{credentials, Client, Context, Credentials};

use crate::cli::LoginArgs;
use crate::config::OutputFormat;
use crate::output::{output_session, output_token, prompt_password};
use crate::CliConfig;

/// Reads and prints the session behind `token`.
pub async fn run_read_session(
    client: &Client,
    ctx: &Context,
    token: &str,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let session = client.read_session(ctx, token).await?;
    output_session(&session, format)
}

/// Logs in. Prints the token when `token_only`, the full session otherwise.
pub async fn run_create_session(
    client: &Client,
    ctx: &Context,
    login: LoginArgs,
    config: &CliConfig,
    format: OutputFormat,
    token_only: bool,
) -> crate::CliResult<()> {
    let credentials = resolve_credentials(login, config)?;

    if token_only {
        let token = client.create_session_token(ctx, &credentials).await?;
        output_token(&token, format)
    } else {
        let session = client.create_session(ctx, &credentials).await?;
        output_session(&session, format)
    }
}

/// Creates a session for `username` on behalf of the `token` session.
pub async fn run_impersonate(
    client: &Client,
    ctx: &Context,
    token: &str,
    username: &str,
    read: bool,
    format: OutputFormat,
) -> crate::CliResult<()> {
    if read {
        let session = client.create_impersonated_session(ctx, token, username).await?;
        output_session(&session, format)
    } else {
        let token = client
            .create_impersonated_session_token(ctx, token, username)
            .await?;
        output_token(&token, format)
    }
}

/// Fills in the username from config and prompts for a missing password.
fn resolve_credentials(login: LoginArgs, config: &CliConfig) -> crate::CliResult<Credentials> {
    let username = config
        .effective_username(login.username.as_deref())
        .ok_or_else(|| {
            crate::CliError::InvalidArgument(
                "a username is required (--username or default_username)".to_string(),
            )
        })?;

    let password = match login.password {
        Some(p) => p,
        None => prompt_password(&format!("Password for {username}: "))?,
    };

    Ok(build_credentials(username, password, login.yubikey))
}

/// Assembles the factor map; the Yubikey factor is only sent when given.
fn build_credentials(username: String, password: String, yubikey: Option<String>) -> Credentials {
    let mut creds = Credentials::username_password(username, password);
    if let Some(otp) = yubikey.filter(|otp| !otp.is_empty()) {
        creds.insert(credentials::YUBIKEY, otp);
    }
    creds
}
