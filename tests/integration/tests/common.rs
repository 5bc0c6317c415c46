//! Common test utilities and fixtures.
//!
//! Each test starts its own fixture service on an ephemeral port, so fixture
//! data is never shared between tests and they can run in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use auth_client::{Client, Credentials, SessionData};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Token handed out for every successful login.
pub const GOOD_SESSION: &str = "good-session";
/// Token handed out for every successful impersonation.
pub const IMPERSONATED_SESSION: &str = "impersonated-session";

/// A user known to the fixture service.
#[derive(Debug, Clone)]
pub struct FixtureUser {
    /// Expected password; `None` matches a request without one.
    pub password: Option<String>,
    /// Token returned on successful login.
    pub token: String,
}

/// Data served by the fixture service.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    /// Users by username.
    pub users: HashMap<String, FixtureUser>,
    /// Sessions by token.
    pub sessions: HashMap<String, SessionData>,
}

impl Fixtures {
    /// The standard data set: `good-user`/`foo` logs in to `good-session`.
    pub fn standard() -> Self {
        let mut fixtures = Self::default();
        fixtures.users.insert(
            "good-user".to_string(),
            FixtureUser {
                password: Some("foo".to_string()),
                token: GOOD_SESSION.to_string(),
            },
        );
        fixtures.users.insert(
            "another-user".to_string(),
            FixtureUser {
                password: None,
                token: GOOD_SESSION.to_string(),
            },
        );
        fixtures.sessions.insert(GOOD_SESSION.to_string(), good_session());
        fixtures.sessions.insert(
            IMPERSONATED_SESSION.to_string(),
            SessionData {
                token: IMPERSONATED_SESSION.to_string(),
                username: "impersonated".to_string(),
                factors: vec!["impersonation".to_string()],
                group_memberships: Default::default(),
            },
        );
        fixtures
    }
}

/// The session behind [`GOOD_SESSION`].
pub fn good_session() -> SessionData {
    SessionData {
        token: GOOD_SESSION.to_string(),
        username: "foo".to_string(),
        factors: vec!["password".to_string(), "google-auth".to_string()],
        group_memberships: ["staff".to_string()].into_iter().collect(),
    }
}

/// Credentials that log in successfully against [`Fixtures::standard`].
pub fn good_credentials() -> Credentials {
    Credentials::username_password("good-user", "foo")
}

/// A request as seen by the fixture service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// `Accept` header, if any.
    pub accept: Option<String>,
    /// Raw body.
    pub body: Bytes,
}

/// Shared log of requests received by a test service.
pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

#[derive(Clone)]
struct FixtureState {
    fixtures: Arc<Fixtures>,
    log: RequestLog,
}

/// Test environment: a running service plus a client pointed at it.
pub struct TestEnv {
    /// Base URL of the running service.
    pub base_url: String,
    /// Client under test.
    pub client: Client,
    /// Requests received, in order. Only filled by the fixture service.
    pub requests: RequestLog,
    /// Service shutdown signal.
    _shutdown_tx: oneshot::Sender<()>,
}

impl TestEnv {
    /// Starts the fixture service with the standard data set.
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_fixtures(Fixtures::standard()).await
    }

    /// Starts the fixture service with the given data.
    pub async fn with_fixtures(fixtures: Fixtures) -> anyhow::Result<Self> {
        let log = RequestLog::default();
        let state = FixtureState {
            fixtures: Arc::new(fixtures),
            log: Arc::clone(&log),
        };
        let router = Router::new().fallback(fixture_handler).with_state(state);
        let mut env = Self::with_router(router).await?;
        env.requests = log;
        Ok(env)
    }

    /// Starts a service that answers every request after `delay`.
    pub async fn slow(delay: Duration) -> anyhow::Result<Self> {
        let router = Router::new().fallback(move || async move {
            tokio::time::sleep(delay).await;
            GOOD_SESSION
        });
        Self::with_router(router).await
    }

    /// Starts an arbitrary service.
    pub async fn with_router(router: Router) -> anyhow::Result<Self> {
        // Initialize tracing for tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter("auth_client=debug")
            .with_test_writer()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let (_shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::error!("Fixture service error: {}", e);
            }
        });

        let client = Client::new(&base_url)?;

        Ok(Self {
            base_url,
            client,
            requests: RequestLog::default(),
            _shutdown_tx,
        })
    }

    /// Snapshot of the requests received so far.
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

/// Answers like a real session service, from [`Fixtures`].
async fn fixture_handler(
    State(state): State<FixtureState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header_value(header::CONTENT_TYPE);
    if let Ok(mut log) = state.log.lock() {
        log.push(RecordedRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            content_type: content_type.clone(),
            accept: header_value(header::ACCEPT),
            body: body.clone(),
        });
    }

    let segments: Vec<&str> = uri.path().trim_start_matches('/').split('/').collect();
    let Some(idx) = segments.iter().position(|s| *s == "session") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let rest = &segments[idx + 1..];

    match method {
        Method::GET => match rest {
            [token] => match state.fixtures.sessions.get(*token) {
                // The token is not part of the session body.
                Some(session) => (
                    [(header::CONTENT_TYPE, "application/json")],
                    serde_json::json!({
                        "username": session.username,
                        "factors": session.factors,
                        "group_memberships": session.group_memberships,
                    })
                    .to_string(),
                )
                    .into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            },
            _ => StatusCode::NOT_FOUND.into_response(),
        },
        Method::POST => {
            if content_type.as_deref() != Some("application/json") {
                return (StatusCode::BAD_REQUEST, "Bad content-type").into_response();
            }
            let creds: HashMap<String, String> = match serde_json::from_slice(&body) {
                Ok(creds) => creds,
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        format!("Error parsing body to JSON: {e}"),
                    )
                        .into_response()
                }
            };
            match rest {
                [] => {
                    let user = creds
                        .get("username")
                        .and_then(|name| state.fixtures.users.get(name));
                    match user {
                        Some(user) if user.password.as_ref() == creds.get("password") => {
                            user.token.clone().into_response()
                        }
                        _ => StatusCode::FORBIDDEN.into_response(),
                    }
                }
                [acting, _target] => {
                    if state.fixtures.sessions.contains_key(*acting) {
                        IMPERSONATED_SESSION.into_response()
                    } else {
                        StatusCode::FORBIDDEN.into_response()
                    }
                }
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
