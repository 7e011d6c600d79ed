//! Password credentials.
//!
//! Custom Debug redacts the password and security token.

use simpleforce_client::{Error, ErrorKind, Result};

/// Username, password and security token for [`crate::PasswordLogin`].
#[derive(Clone)]
pub struct PasswordCredentials {
    username: String,
    password: String,
    security_token: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security_token", &"[REDACTED]")
            .finish()
    }
}

impl PasswordCredentials {
    /// Create credentials. Pass an empty token when the caller's IP is trusted.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
        }
    }

    /// The login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub(crate) fn security_token(&self) -> &str {
        &self.security_token
    }

    /// Load credentials from environment variables.
    ///
    /// Required:
    /// - `SF_USERNAME` or `SALESFORCE_USERNAME`
    /// - `SF_PASSWORD` or `SALESFORCE_PASSWORD`
    ///
    /// Optional:
    /// - `SF_SECURITY_TOKEN` or `SALESFORCE_SECURITY_TOKEN` (default: empty)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |primary: &str, fallback: &str| lookup(primary).or_else(|| lookup(fallback));

        let username =
            var("SF_USERNAME", "SALESFORCE_USERNAME").ok_or_else(|| missing("SF_USERNAME"))?;
        let password =
            var("SF_PASSWORD", "SALESFORCE_PASSWORD").ok_or_else(|| missing("SF_PASSWORD"))?;
        let security_token =
            var("SF_SECURITY_TOKEN", "SALESFORCE_SECURITY_TOKEN").unwrap_or_default();

        Ok(Self::new(username, password, security_token))
    }
}

fn missing(name: &str) -> Error {
    Error::new(ErrorKind::Config(format!(
        "environment variable {name} is not set"
    )))
}
