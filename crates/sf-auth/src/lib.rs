//! # simpleforce-auth
//!
//! Salesforce authentication.
//!
//! ## Security
//!
//! - Passwords, tokens and signatures are redacted in Debug output
//! - Tracing skips credential parameters
//! - SOAP envelope values are XML-escaped
//!
//! ## Supported Authentication Methods
//!
//! - **SOAP password login** - username, password and security token
//! - **OAuth 2.0 Refresh Token** - for refreshing expired access tokens
//! - **OAuth 2.0 Revocation** - for ending a session
//!
//! ## Example
//!
//! ```rust,ignore
//! use simpleforce_auth::{PasswordCredentials, PasswordLogin, PRODUCTION_LOGIN_URL};
//! use simpleforce_client::{ClientConfig, SfHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), simpleforce_auth::Error> {
//!     let creds = PasswordCredentials::from_env()?;
//!     let login = PasswordLogin::new(
//!         SfHttpClient::new(ClientConfig::default())?,
//!         PRODUCTION_LOGIN_URL,
//!         "simpleforce",
//!         "43.0",
//!     );
//!     let session = login.login_with(&creds).await?;
//!     println!("signed in to {}", session.instance_url);
//!     Ok(())
//! }
//! ```

mod credentials;
mod login;
mod oauth;

pub use credentials::PasswordCredentials;
pub use login::{instance_url_of, LoginResult, PasswordLogin, UserInfo};
pub use oauth::{OAuthClient, Token};
pub use simpleforce_client::{Error, ErrorKind, Result};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// Client id sent in the SOAP `CallOptions` header when none is configured.
pub const DEFAULT_CLIENT_ID: &str = "simpleforce";
