//! Authenticated Salesforce transport.
//!
//! `SalesforceClient` holds the session id, instance URL and API version and
//! attaches them to every REST call.
//!
//! ## Security
//!
//! - The session id is redacted in Debug output
//! - Request bodies are skipped in tracing spans

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{RawResponse, Response};
use crate::DEFAULT_API_VERSION;

/// Authenticated Salesforce API transport.
///
/// An empty session id means "not logged in"; the session is filled in by a
/// login or restored with [`SalesforceClient::set_session`].
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    session_id: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("session_id", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a client for the given instance URL and session id.
    pub fn new(instance_url: impl Into<String>, session_id: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, session_id, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        session_id: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self::from_http(http, instance_url, session_id))
    }

    /// Create a client on top of an existing HTTP client.
    pub fn from_http(
        http: SfHttpClient,
        instance_url: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            instance_url: normalize_instance_url(instance_url.into()),
            session_id: session_id.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set the API version (e.g., "43.0"; a leading "v" is dropped).
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = normalize_api_version(&version.into());
        self
    }

    /// Replace the session id and instance URL.
    pub fn set_session(&mut self, session_id: impl Into<String>, instance_url: impl Into<String>) {
        self.session_id = session_id.into();
        self.instance_url = normalize_instance_url(instance_url.into());
    }

    /// Returns true iff a session id is present.
    pub fn is_authenticated(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the session id (access token).
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the API version, without a leading "v".
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &SfHttpClient {
        &self.http
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs are returned as is; anything else is appended to the
    /// instance URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `{instance}/services/data/v43.0/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// Build the Tooling API URL for a path.
    pub fn tooling_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/tooling/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.session_id)
    }

    /// Execute a request, classifying any non-2xx response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// Issue an authenticated request and read the whole body.
    ///
    /// Attaches `Authorization: Bearer <session id>` and
    /// `Content-Type: application/json`. A non-2xx status yields the
    /// classified error; transport failures yield their own error kinds.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn request(
        &self,
        method: RequestMethod,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<RawResponse> {
        let mut request = RequestBuilder::new(method, self.url(url))
            .bearer_auth(&self.session_id)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.bytes(body);
        }
        self.http.execute(request).await?.into_raw().await
    }

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url));
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// GET request to the REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json(&self.rest_url(path)).await
    }
}

/// Drop any leading "v" from an API version string ("v43.0" -> "43.0").
pub fn normalize_api_version(version: &str) -> String {
    version.trim().trim_start_matches(['v', 'V']).to_string()
}

fn normalize_instance_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch the next batch of results; pass it back to `query` verbatim.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}

impl<T> QueryResult<T> {
    /// Transform every record, keeping the paging fields.
    pub fn map_records<U>(self, f: impl FnMut(T) -> U) -> QueryResult<U> {
        QueryResult {
            total_size: self.total_size,
            done: self.done,
            next_records_url: self.next_records_url,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}
