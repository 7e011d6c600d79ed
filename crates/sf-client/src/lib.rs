//! # simpleforce-client
//!
//! HTTP transport for the Salesforce APIs.
//!
//! This crate provides:
//! - Classification of Salesforce error bodies (JSON error arrays and SOAP faults)
//! - A retryability predicate over HTTP status codes
//! - An authenticated transport that attaches the session to every call
//! - Compression support (gzip, deflate) and connection pooling
//!
//! Nothing in this crate retries; callers decide what to do with
//! [`Error::is_retryable`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (simpleforce-auth, simpleforce-rest)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds session id, instance URL, API version              │
//! │  - request(method, url, body) -> RawResponse                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP with compression                                │
//! │  - Non-2xx bodies -> ClassifiedError                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use simpleforce_client::{RequestMethod, SalesforceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), simpleforce_client::Error> {
//!     let client = SalesforceClient::new("https://na1.salesforce.com", "00D...!AQ...")?;
//!
//!     let raw = client
//!         .request(RequestMethod::Get, &client.rest_url("limits"), None)
//!         .await?;
//!     let limits: serde_json::Value = raw.json()?;
//!
//!     Ok(())
//! }
//! ```

mod classify;
mod client;
mod config;
mod error;
mod request;
mod response;
mod retry;
mod salesforce_client;
pub mod security;

pub use classify::{classify, ClassifiedError, STATUS_CODE_KEY};
pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{RawResponse, Response};
pub use retry::{is_retryable, RETRYABLE_STATUS_CODES};
pub use salesforce_client::{normalize_api_version, QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "43.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("simpleforce/", env!("CARGO_PKG_VERSION"));
