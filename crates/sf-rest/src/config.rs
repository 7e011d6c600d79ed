//! API-level configuration for [`crate::ForceClient`].

use simpleforce_client::{normalize_api_version, ClientConfig, DEFAULT_API_VERSION};

use simpleforce_auth::{DEFAULT_CLIENT_ID, PRODUCTION_LOGIN_URL};

/// Default number of records fetched concurrently by
/// [`crate::ForceClient::fetch_updated`].
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

/// Configuration for a [`crate::ForceClient`].
#[derive(Debug, Clone)]
pub struct ForceConfig {
    /// Login host, used for SOAP login and for OAuth calls before a session exists.
    pub base_url: String,
    /// Client id sent with the SOAP login.
    pub client_id: String,
    /// API version without a leading "v" (e.g., "43.0").
    pub api_version: String,
    /// Route SOQL queries to the Tooling API.
    pub use_tooling_api: bool,
    /// Maximum number of record fetches in flight during a batch fetch.
    pub batch_concurrency: usize,
    /// HTTP settings.
    pub http: ClientConfig,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_LOGIN_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_tooling_api: false,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            http: ClientConfig::default(),
        }
    }
}

impl ForceConfig {
    /// Create a new config builder.
    pub fn builder() -> ForceConfigBuilder {
        ForceConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// All are optional:
    /// - `SF_LOGIN_URL` or `SALESFORCE_LOGIN_URL`
    /// - `SF_CLIENT_ID`
    /// - `SF_API_VERSION`
    /// - `SF_USE_TOOLING_API` (`true`/`1` to enable)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::builder();

        if let Some(url) = lookup("SF_LOGIN_URL").or_else(|| lookup("SALESFORCE_LOGIN_URL")) {
            builder = builder.with_base_url(url);
        }
        if let Some(client_id) = lookup("SF_CLIENT_ID") {
            builder = builder.with_client_id(client_id);
        }
        if let Some(version) = lookup("SF_API_VERSION") {
            builder = builder.with_api_version(version);
        }
        if let Some(flag) = lookup("SF_USE_TOOLING_API") {
            let enabled = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
            builder = builder.with_tooling_api(enabled);
        }

        builder.build()
    }
}

/// Builder for [`ForceConfig`].
#[derive(Debug, Default)]
pub struct ForceConfigBuilder {
    config: ForceConfig,
}

impl ForceConfigBuilder {
    /// Set the login host (e.g., `https://test.salesforce.com` for sandboxes).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the client id sent with the SOAP login.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = client_id.into();
        self
    }

    /// Set the API version; "v43.0" and "43.0" are equivalent.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = normalize_api_version(&version.into());
        self
    }

    /// Route SOQL queries to the Tooling API.
    pub fn with_tooling_api(mut self, enabled: bool) -> Self {
        self.config.use_tooling_api = enabled;
        self
    }

    /// Set the batch fetch width. Values below 1 are raised to 1.
    pub fn with_batch_concurrency(mut self, width: usize) -> Self {
        self.config.batch_concurrency = width.max(1);
        self
    }

    /// Set the HTTP configuration.
    pub fn with_http_config(mut self, http: ClientConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ForceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ForceConfig::default();
        assert_eq!(config.base_url, "https://login.salesforce.com");
        assert_eq!(config.client_id, "simpleforce");
        assert_eq!(config.api_version, "43.0");
        assert!(!config.use_tooling_api);
        assert_eq!(config.batch_concurrency, 8);
    }

    #[test]
    fn test_builder() {
        let config = ForceConfig::builder()
            .with_base_url("https://test.salesforce.com/")
            .with_client_id("my-app")
            .with_api_version("v50.0")
            .with_tooling_api(true)
            .with_batch_concurrency(0)
            .build();

        assert_eq!(config.base_url, "https://test.salesforce.com");
        assert_eq!(config.client_id, "my-app");
        assert_eq!(config.api_version, "50.0");
        assert!(config.use_tooling_api);
        assert_eq!(config.batch_concurrency, 1);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("SALESFORCE_LOGIN_URL", "https://test.salesforce.com"),
            ("SF_API_VERSION", "v45.0"),
            ("SF_USE_TOOLING_API", "TRUE"),
        ]
        .into_iter()
        .collect();

        let config = ForceConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.base_url, "https://test.salesforce.com");
        assert_eq!(config.client_id, "simpleforce");
        assert_eq!(config.api_version, "45.0");
        assert!(config.use_tooling_api);
    }
}
