//! Session protocol operations.
//!
//! Wire contract, relative to the session endpoint:
//!
//! | operation | request | success |
//! |-----------|---------|---------|
//! | read | `GET /{token}` | `200` + session JSON |
//! | create | `POST /` + credentials JSON | `200` + bare token |
//! | impersonate | `POST /{acting_token}/{username}` | `200` + bare token |
//!
//! The token comes back as the raw response body, not in an envelope or a
//! header, so there is no other metadata to read.

use std::collections::BTreeSet;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::context::Context;
use crate::credentials::Credentials;
use crate::error::{ClientError, ClientResult};

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain";

/// Body sent with impersonation requests; authorization is in the path.
const EMPTY_OBJECT: &[u8] = b"{}";

/// A resolved session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Token the session was read with. The service does not send it back.
    #[serde(skip_deserializing)]
    pub token: String,
    /// Account the session belongs to.
    #[serde(default)]
    pub username: String,
    /// Authentication factors satisfied, in the order the service lists them.
    #[serde(default)]
    pub factors: Vec<String>,
    /// Groups the user is a member of.
    #[serde(default)]
    pub group_memberships: BTreeSet<String>,
}

impl SessionData {
    /// Returns whether the user belongs to `group`.
    #[must_use]
    pub fn is_member_of(&self, group: &str) -> bool {
        self.group_memberships.contains(group)
    }

    /// Returns whether `factor` was used to authenticate.
    #[must_use]
    pub fn has_factor(&self, factor: &str) -> bool {
        self.factors.iter().any(|f| f == factor)
    }
}

impl Client {
    /// Reads the session identified by `token`.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidPathSegment`] if `token` is `.` or `..`,
    /// [`ClientError::EmptyResponse`] if the service answers 2xx with no body,
    /// [`ClientError::Decode`] if the body is not session JSON, and any
    /// executor error (`Transport`, `Cancelled`, `ServerRejected`).
    pub async fn read_session(&self, ctx: &Context, token: &str) -> ClientResult<SessionData> {
        let request = self
            .executor
            .http()
            .get(self.endpoint.join([token])?)
            .header(ACCEPT, APPLICATION_JSON);

        let body = self
            .executor
            .execute(ctx, "read_session", &self.endpoint, request)
            .await?;
        if body.is_empty() {
            return Err(ClientError::EmptyResponse("read_session"));
        }

        let mut session: SessionData = serde_json::from_slice(&body).map_err(ClientError::Decode)?;
        session.token = token.to_string();
        Ok(session)
    }

    /// Exchanges credentials for a new session token.
    ///
    /// The token is returned exactly as the service sent it.
    ///
    /// # Errors
    ///
    /// [`ClientError::Encode`] if the credentials cannot be serialized,
    /// [`ClientError::EmptyResponse`] if no token came back, and any executor
    /// error. Rejected credentials surface as `ServerRejected` (usually 403).
    pub async fn create_session_token(
        &self,
        ctx: &Context,
        credentials: &Credentials,
    ) -> ClientResult<String> {
        let body = serde_json::to_vec(credentials).map_err(ClientError::Encode)?;
        let request = self
            .executor
            .http()
            .post(self.endpoint.as_url().clone())
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, TEXT_PLAIN)
            .body(body);

        let token = self
            .executor
            .execute(ctx, "create_session_token", &self.endpoint, request)
            .await?;
        token_from_body(token, "create_session_token")
    }

    /// Creates a session and reads it back.
    ///
    /// Fails with whichever step fails first, unchanged. A token created
    /// before a failing read is not revoked.
    ///
    /// # Errors
    ///
    /// See [`create_session_token`](Self::create_session_token) and
    /// [`read_session`](Self::read_session).
    pub async fn create_session(
        &self,
        ctx: &Context,
        credentials: &Credentials,
    ) -> ClientResult<SessionData> {
        let token = self.create_session_token(ctx, credentials).await?;
        self.read_session(ctx, &token).await
    }

    /// Asks for a session for `target_username`, authorized by the session
    /// `acting_token`.
    ///
    /// No credentials are sent; the acting token in the URL is the only
    /// authorization.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidPathSegment`] if either argument is `.` or `..`,
    /// [`ClientError::EmptyResponse`] if no token came back, and any executor
    /// error. An invalid or unprivileged acting token surfaces as
    /// `ServerRejected` (usually 403).
    pub async fn create_impersonated_session_token(
        &self,
        ctx: &Context,
        acting_token: &str,
        target_username: &str,
    ) -> ClientResult<String> {
        let request = self
            .executor
            .http()
            .post(self.endpoint.join([acting_token, target_username])?)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, TEXT_PLAIN)
            .body(EMPTY_OBJECT);

        let token = self
            .executor
            .execute(ctx, "create_impersonated_session_token", &self.endpoint, request)
            .await?;
        token_from_body(token, "create_impersonated_session_token")
    }

    /// Creates an impersonated session and reads it back.
    ///
    /// # Errors
    ///
    /// See [`create_impersonated_session_token`](Self::create_impersonated_session_token)
    /// and [`read_session`](Self::read_session).
    pub async fn create_impersonated_session(
        &self,
        ctx: &Context,
        acting_token: &str,
        target_username: &str,
    ) -> ClientResult<SessionData> {
        let token = self
            .create_impersonated_session_token(ctx, acting_token, target_username)
            .await?;
        self.read_session(ctx, &token).await
    }
}

/// Interprets a response body as a token, verbatim.
fn token_from_body(body: Vec<u8>, operation: &'static str) -> ClientResult<String> {
    if body.is_empty() {
        return Err(ClientError::EmptyResponse(operation));
    }
    Ok(match String::from_utf8(body) {
        Ok(token) => token,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
