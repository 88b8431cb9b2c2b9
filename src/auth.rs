//! Operator login. This is a gate in front of the raffle screens, not a
//! security boundary: the credential pair ships with the binary and the
//! session lives only as long as the process.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Credential pair compiled into the binary.
const BUILTIN_CREDENTIALS: &str = include_str!("../data/auth.json");

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to read credentials file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials data is malformed")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn builtin() -> Result<Self, AuthError> {
        Self::from_json(BUILTIN_CREDENTIALS)
    }

    pub fn from_json(text: &str) -> Result<Self, AuthError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, AuthError> {
        let text = fs::read_to_string(path).map_err(|source| AuthError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Exact match on both fields.
    pub fn validate(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Login state of the single operator.
#[derive(Debug, Default)]
pub struct Session {
    logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the supplied pair and start the session on success. A rejected
    /// attempt leaves any existing session untouched.
    pub fn login(&mut self, credentials: &Credentials, username: &str, password: &str) -> bool {
        if credentials.validate(username, password) {
            self.logged_in_at = Some(Utc::now());
            info!(username, "operator logged in");
            true
        } else {
            warn!(username, "rejected login attempt");
            false
        }
    }

    pub fn logout(&mut self) {
        if self.logged_in_at.take().is_some() {
            info!("operator logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.logged_in_at.is_some()
    }

    pub fn login_time(&self) -> Option<DateTime<Utc>> {
        self.logged_in_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_credentials_parse() {
        let credentials = Credentials::builtin().unwrap();
        assert!(!credentials.username.is_empty());
        assert!(!credentials.password.is_empty());
    }

    #[test]
    fn validate_requires_both_fields() {
        let credentials = Credentials::new("admin", "secret");
        assert!(credentials.validate("admin", "secret"));
        assert!(!credentials.validate("admin", "Secret"));
        assert!(!credentials.validate("Admin", "secret"));
        assert!(!credentials.validate("", ""));
    }

    #[test]
    fn session_tracks_login_and_logout() {
        let credentials = Credentials::new("admin", "secret");
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        let before = Utc::now();
        assert!(session.login(&credentials, "admin", "secret"));
        assert!(session.is_authenticated());
        assert!(session.login_time().unwrap() >= before);

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.login_time().is_none());
    }

    #[test]
    fn failed_login_is_a_denial_not_an_error() {
        let credentials = Credentials::new("admin", "secret");
        let mut session = Session::new();
        assert!(!session.login(&credentials, "admin", "wrong"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn malformed_credentials_are_rejected() {
        assert!(matches!(
            Credentials::from_json("{\"username\":\"a\"}"),
            Err(AuthError::Parse(_))
        ));
    }
}
