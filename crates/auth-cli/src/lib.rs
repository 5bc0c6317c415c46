//! # auth-cli
//!
//! Command-line front end for the session service client.
//!
//! This crate provides command-line utilities for:
//! - Logging in (session data or bare token)
//! - Reading a session back by token
//! - Impersonating another user from an existing session
//! - Managing the CLI configuration file

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
