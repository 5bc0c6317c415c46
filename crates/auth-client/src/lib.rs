//! # auth-client
//!
//! Client library for the session/authentication service.
//!
//! The service speaks a small HTTP+JSON protocol rooted at a session
//! collection (`{base}/session`). This crate covers the consuming side:
//!
//! - creating a session token from n-factor credentials
//! - reading session data back by token
//! - creating impersonated sessions, authorized by an existing token
//!
//! Every operation takes a [`Context`] so callers can cancel or bound it in
//! time, and every failure is one [`ClientError`] variant.
//!
//! ## Usage
//!
//! ```no_run
//! use auth_client::{Client, Context, Credentials};
//!
//! # async fn run() -> auth_client::ClientResult<()> {
//! let client = Client::new("https://auth.example.com")?;
//! let ctx = Context::with_timeout(std::time::Duration::from_secs(10));
//!
//! let creds = Credentials::username_password("alice", "hunter2");
//! let session = client.create_session(&ctx, &creds).await?;
//! println!("{} is in {:?}", session.username, session.group_memberships);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod config;
pub mod context;
pub mod credentials;
pub mod endpoint;
pub mod error;
mod executor;
pub mod session;

pub use client::Client;
pub use config::ClientConfig;
pub use context::{CancelHandle, CancelReason, Context};
pub use credentials::Credentials;
pub use endpoint::Endpoint;
pub use error::{ClientError, ClientResult};
pub use session::SessionData;
