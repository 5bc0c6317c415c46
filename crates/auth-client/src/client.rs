//! The session service client.

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ClientResult;
use crate::executor::Executor;

/// Client for the session service.
///
/// Immutable after construction. Cloning is cheap and clones share one
/// connection pool, so a single client can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) endpoint: Endpoint,
    pub(crate) executor: Executor,
}

impl Client {
    /// Creates a client for the service at `endpoint` with default transport
    /// settings.
    ///
    /// `endpoint` is the service base URL; `/session` is appended.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`](crate::ClientError::InvalidEndpoint)
    /// or [`ClientError::UnsupportedScheme`](crate::ClientError::UnsupportedScheme).
    /// No network access happens here.
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        Self::with_config(endpoint, &ClientConfig::default())
    }

    /// Creates a client with explicit transport settings.
    ///
    /// # Errors
    ///
    /// As [`Client::new`], plus [`ClientError::Transport`](crate::ClientError::Transport)
    /// if the transport cannot be initialised.
    pub fn with_config(endpoint: &str, config: &ClientConfig) -> ClientResult<Self> {
        let endpoint = Endpoint::parse(endpoint)?;
        let http = config.build_transport()?;
        Ok(Self::from_parts(endpoint, http))
    }

    /// Creates a client around an existing transport.
    #[must_use]
    pub const fn from_parts(endpoint: Endpoint, http: reqwest::Client) -> Self {
        Self {
            endpoint,
            executor: Executor::new(http),
        }
    }

    /// The resolved session endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}
