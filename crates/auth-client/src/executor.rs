//! Single-shot request execution.
//!
//! [`Executor::execute`] sends exactly one request, races it against the
//! caller's [`Context`], and folds the outcome into a [`ClientResult`]:
//! raw body bytes on 2xx, a classified error otherwise. Retrying is left to
//! the caller.

use reqwest::{RequestBuilder, StatusCode};

use crate::context::Context;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, ClientResult};

/// Runs requests through the shared transport.
#[derive(Debug, Clone)]
pub(crate) struct Executor {
    http: reqwest::Client,
}

impl Executor {
    pub(crate) const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// The shared transport, for building requests.
    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Sends `request` and reads the whole response body.
    ///
    /// Log events carry `operation`, the method and `endpoint`; the full
    /// request URL is never logged since it carries session tokens.
    pub(crate) async fn execute(
        &self,
        ctx: &Context,
        operation: &'static str,
        endpoint: &Endpoint,
        request: RequestBuilder,
    ) -> ClientResult<Vec<u8>> {
        if let Some(reason) = ctx.err() {
            return Err(ClientError::Cancelled(reason));
        }

        let request = request.build().map_err(ClientError::Transport)?;
        let method = request.method().clone();

        tracing::debug!(operation, %method, %endpoint, "sending session request");

        let exchange = async {
            let response = self.http.execute(request).await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let outcome = tokio::select! {
            biased;
            reason = ctx.done() => return Err(ClientError::Cancelled(reason)),
            outcome = exchange => outcome,
        };

        let (status, body) = match outcome {
            Ok(parts) => parts,
            // The transport may surface its own error just as the context
            // fires; cancellation wins regardless of what the error says.
            Err(err) => {
                return Err(match ctx.err() {
                    Some(reason) => ClientError::Cancelled(reason),
                    None => ClientError::Transport(err),
                });
            }
        };

        tracing::debug!(
            operation,
            %method,
            %endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "session response"
        );

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        Ok(body.to_vec())
    }
}

/// Builds the error for a non-2xx response.
fn rejection(status: StatusCode, body: &[u8]) -> ClientError {
    let message = if body.is_empty() {
        status_line(status)
    } else {
        String::from_utf8_lossy(body).into_owned()
    };
    ClientError::ServerRejected {
        status: status.as_u16(),
        message,
    }
}

/// `403 Forbidden`, or just `599` for codes without a reason phrase.
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
