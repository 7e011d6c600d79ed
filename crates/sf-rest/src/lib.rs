//! # simpleforce-rest
//!
//! Salesforce REST API client built around a single session-owning
//! [`ForceClient`].
//!
//! ## Features
//!
//! - **Session** - SOAP password login, adopting an existing session, OAuth refresh/revoke
//! - **SOQL Query** - REST or Tooling endpoint, with `nextRecordsUrl` continuation
//! - **SObject CRUD** - records bound to the client that produced them
//! - **Updated-record sync** - ids changed in a time window, fetched with bounded concurrency
//! - **Describe** - global object listing
//! - **Files** - stream a ContentVersion body to any async writer or a path
//!
//! ## Example
//!
//! ```rust,ignore
//! use simpleforce_rest::{ForceClient, ForceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), simpleforce_rest::Error> {
//!     let mut client = ForceClient::new(ForceConfig::from_env())?;
//!     client.login("user@example.com", "password", "token").await?;
//!
//!     // Query
//!     let result = client.query("SELECT Id, Name FROM Account LIMIT 10").await?;
//!
//!     // Update a queried record in place
//!     for mut account in result.records {
//!         account.set("Description", "touched");
//!         account.save().await?;
//!     }
//!
//!     // Create
//!     let mut contact = client.sobject("Contact");
//!     contact.set("LastName", "Doe");
//!     contact.save().await?;
//!
//!     // Delete
//!     contact.delete().await?;
//!
//!     Ok(())
//! }
//! ```

mod batch;
mod client;
mod config;
mod describe;
mod record;
mod sobject;

pub use batch::{BatchFetch, FetchOutcome, UpdatedRecords};
pub use client::ForceClient;
pub use config::{ForceConfig, ForceConfigBuilder, DEFAULT_BATCH_CONCURRENCY};
pub use describe::{DescribeGlobalResult, SObjectSummary};
pub use record::{BoundRecord, RecordSession};
pub use sobject::{CreateResult, SObject, SalesforceError};

// Re-export commonly used types from the lower crates
pub use simpleforce_auth::{PasswordCredentials, Token, UserInfo};
pub use simpleforce_client::{
    ClassifiedError, ClientConfig, Error, ErrorKind, QueryResult, Result,
};
