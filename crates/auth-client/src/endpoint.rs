//! Session endpoint resolution.
//!
//! Turns a user-supplied base URL (`https://auth.example.com`,
//! `http://localhost:8080/api/`) into the canonical session collection URL
//! (`.../session`) that every protocol operation hangs off.

use std::fmt;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Final path segment of the session collection.
const SESSION_SEGMENT: &str = "session";

/// Canonical session collection URL.
///
/// Always `http` or `https`, and the path always ends in exactly one
/// `/session` segment with no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Parses and normalizes a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if `base` does not parse as an
    /// absolute URL, or [`ClientError::UnsupportedScheme`] for anything other
    /// than `http`/`https`.
    pub fn parse(base: &str) -> ClientResult<Self> {
        let mut url = Url::parse(base).map_err(|source| ClientError::InvalidEndpoint {
            endpoint: base.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ClientError::UnsupportedScheme(other.to_string())),
        }

        let mut path = url.path().trim_end_matches('/').to_string();
        path.push('/');
        path.push_str(SESSION_SEGMENT);
        url.set_path(&path);
        url.set_fragment(None);

        Ok(Self { url })
    }

    /// The endpoint as a URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }

    /// The endpoint as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Builds `{endpoint}/{segment}/...`, percent-encoding each segment.
    ///
    /// `.` and `..` have no encoded form that survives URL normalization
    /// (`%2E%2E` is itself a dot segment), so they are refused rather than
    /// silently dropped.
    pub(crate) fn join<I, S>(&self, segments: I) -> ClientResult<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.url.clone();
        // http(s) URLs always have a base, so this cannot fail once parsed.
        if let Ok(mut path) = url.path_segments_mut() {
            for segment in segments {
                let segment = segment.as_ref();
                if matches!(segment, "." | "..") {
                    return Err(ClientError::InvalidPathSegment(segment.to_string()));
                }
                path.push(segment);
            }
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        Self::parse(s)
    }
}
