//! Login credentials.
//!
//! The service does n-factor authentication: the request body is a flat
//! object of factor name to credential value, for example
//! `{"username": "bob", "password": "hunter2", "yubikey": "cccc..."}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Factor name carrying the account name.
pub const USERNAME: &str = "username";
/// Factor name for a password.
pub const PASSWORD: &str = "password";
/// Factor name for a Yubikey OTP.
pub const YUBIKEY: &str = "yubikey";

/// Factor name to credential value.
///
/// `Debug` output masks every value except the username.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    /// Creates an empty credential set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the common username + password pair.
    #[must_use]
    pub fn username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new().with(USERNAME, username).with(PASSWORD, password)
    }

    /// Adds a factor, builder style.
    #[must_use]
    pub fn with(mut self, factor: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(factor, value);
        self
    }

    /// Adds or replaces a factor, returning the previous value.
    pub fn insert(&mut self, factor: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(factor.into(), value.into())
    }

    /// Returns the value for a factor.
    #[must_use]
    pub fn get(&self, factor: &str) -> Option<&str> {
        self.0.get(factor).map(String::as_str)
    }

    /// Returns the username factor, if present.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.get(USERNAME)
    }

    /// Iterates over the factor names.
    pub fn factors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no factors are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Credentials
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (factor, value) in &self.0 {
            if factor == USERNAME {
                map.entry(factor, value);
            } else {
                map.entry(factor, &"***");
            }
        }
        map.finish()
    }
}
