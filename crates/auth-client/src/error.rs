//! Error handling for the session client.
//!
//! Construction-time errors (`InvalidEndpoint`, `UnsupportedScheme`) are fatal
//! to the client being built. Every other variant is produced by a single
//! operation and handed back to the caller untouched; nothing here is retried
//! or logged.

use thiserror::Error;

use crate::context::CancelReason;

/// Result type alias using the client error type.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors returned by the session client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint string could not be parsed as a URL.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// The endpoint as supplied by the caller.
        endpoint: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The endpoint uses a scheme other than `http` or `https`.
    #[error("endpoint scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A token or username cannot be carried as a URL path segment.
    #[error("{0:?} cannot be used as a session path segment")]
    InvalidPathSegment(String),

    /// The context fired before the exchange completed.
    #[error("request cancelled: {0}")]
    Cancelled(CancelReason),

    /// The service answered with a non-2xx status.
    #[error("server rejected request ({status}): {message}")]
    ServerRejected {
        /// HTTP status code.
        status: u16,
        /// Response body, or the status line when the body was empty.
        message: String,
    },

    /// The service answered 2xx with no body where one is required.
    #[error("empty response body from {0}")]
    EmptyResponse(&'static str),

    /// The response body was not valid session JSON.
    #[error("failed to decode session data: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("failed to encode credentials: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns whether the operation was cut short by its context.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Returns whether the service refused the request.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::ServerRejected { .. })
    }

    /// Returns whether this error came from building a client.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(self, Self::InvalidEndpoint { .. } | Self::UnsupportedScheme(_))
    }

    /// HTTP status of a rejected request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
