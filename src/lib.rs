//! # simpleforce
//!
//! A small Salesforce REST API client library for Rust.
//!
//! One [`ForceClient`] owns a session and exposes SOQL queries, record CRUD,
//! updated-record sync and ContentVersion downloads.
//!
//! ## Security
//!
//! - Session ids, passwords and tokens are redacted in Debug output
//! - Tracing skips credential parameters
//! - SOAP login values are XML-escaped and path segments percent-encoded
//!
//! ## Crates
//!
//! - **simpleforce-client** - HTTP transport, error classification, retry signals
//! - **simpleforce-auth** - SOAP password login, OAuth refresh and revoke
//! - **simpleforce-rest** - `ForceClient`, SObject records, batch fetch, describe, files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simpleforce::{ForceClient, ForceConfig, PasswordCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ForceClient::new(ForceConfig::from_env())?;
//!     client.login_with(&PasswordCredentials::from_env()?).await?;
//!
//!     let accounts = client.query("SELECT Id, Name FROM Account LIMIT 10").await?;
//!     for account in &accounts.records {
//!         println!("{:?}", account.get_str("Name"));
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use simpleforce_auth as auth;
#[cfg(feature = "client")]
pub use simpleforce_client as client;
#[cfg(feature = "rest")]
pub use simpleforce_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use simpleforce_auth::{PasswordCredentials, Token, UserInfo};
#[cfg(feature = "client")]
pub use simpleforce_client::{ClassifiedError, ClientConfig, Error, ErrorKind, Result};
#[cfg(feature = "rest")]
pub use simpleforce_rest::{BatchFetch, BoundRecord, ForceClient, ForceConfig, SObject};
