//! Salesforce REST API client.
//!
//! `ForceClient` owns the session (session id, instance URL, signed-in user)
//! and wraps `SalesforceClient` from `simpleforce-client` for every call.

use simpleforce_auth::{
    LoginResult, OAuthClient, PasswordCredentials, PasswordLogin, Token, UserInfo,
};
use simpleforce_client::{Error, Result, SalesforceClient, SfHttpClient};
use tracing::{info, instrument};

use crate::config::ForceConfig;

mod binary;
mod crud;
mod describe;
mod query;
mod sync;

/// Salesforce REST API client.
///
/// Session writes (`login`, `set_session`, `refresh_token`) take `&mut self`;
/// every other operation takes `&self` and can run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use simpleforce_rest::{ForceClient, ForceConfig};
///
/// let mut client = ForceClient::new(ForceConfig::default())?;
/// client.login("user@example.com", "password", "securitytoken").await?;
///
/// let result = client.query("SELECT Id, Name FROM Account LIMIT 10").await?;
/// for record in &result.records {
///     println!("{:?}", record.get_str("Name"));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ForceClient {
    config: ForceConfig,
    client: SalesforceClient,
    user: Option<UserInfo>,
}

impl ForceClient {
    /// Create an unauthenticated client.
    pub fn new(config: ForceConfig) -> Result<Self> {
        let http = SfHttpClient::new(config.http.clone())?;
        Ok(Self::from_http(config, http))
    }

    /// Create an unauthenticated client on a caller-supplied reqwest client.
    pub fn with_http_client(config: ForceConfig, http: reqwest::Client) -> Self {
        let http = SfHttpClient::from_reqwest(http, config.http.clone());
        Self::from_http(config, http)
    }

    fn from_http(config: ForceConfig, http: SfHttpClient) -> Self {
        let client =
            SalesforceClient::from_http(http, "", "").with_api_version(config.api_version.clone());
        Self {
            config,
            client,
            user: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Get the underlying transport.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Returns true iff a session id is present.
    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    /// The session id, for persisting the session.
    pub fn session_id(&self) -> &str {
        self.client.session_id()
    }

    /// The instance URL, for persisting the session.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// The signed-in user; `None` until a password login succeeds.
    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Restore a session saved from [`ForceClient::session_id`] and
    /// [`ForceClient::instance_url`].
    pub fn set_session(&mut self, session_id: impl Into<String>, instance_url: impl Into<String>) {
        self.client.set_session(session_id, instance_url);
        self.user = None;
    }

    /// Sign in with username, password and security token.
    #[instrument(skip(self, password, security_token))]
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> Result<()> {
        let result = self
            .password_login()
            .login(username, password, security_token)
            .await?;
        self.apply_login(result);
        Ok(())
    }

    /// Sign in with stored credentials.
    pub async fn login_with(&mut self, credentials: &PasswordCredentials) -> Result<()> {
        let result = self.password_login().login_with(credentials).await?;
        self.apply_login(result);
        Ok(())
    }

    fn password_login(&self) -> PasswordLogin {
        PasswordLogin::new(
            self.client.http().clone(),
            self.config.base_url.clone(),
            self.config.client_id.clone(),
            self.config.api_version.clone(),
        )
    }

    fn apply_login(&mut self, result: LoginResult) {
        self.client.set_session(result.session_id, result.instance_url);
        info!(instance_url = %self.client.instance_url(), "Session established");
        self.user = Some(result.user);
    }

    /// OAuth client for the token host: the instance when signed in, the
    /// login host otherwise.
    fn oauth(&self) -> OAuthClient {
        let host = if self.is_authenticated() && !self.client.instance_url().is_empty() {
            self.client.instance_url()
        } else {
            self.config.base_url.as_str()
        };
        OAuthClient::new(self.client.http().clone(), host)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// A token without `error` and with an access token replaces the current
    /// session. The token is returned either way so callers can inspect
    /// [`Token::has_error`].
    #[instrument(skip(self, client_secret, refresh_token))]
    pub async fn refresh_token(
        &mut self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<Token> {
        let token = self
            .oauth()
            .refresh_token(client_id, client_secret, refresh_token)
            .await?;

        if !token.has_error() {
            if let Some(access_token) = token.access_token() {
                let instance_url = token
                    .instance_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .unwrap_or(self.client.instance_url())
                    .to_string();
                self.client.set_session(access_token, instance_url);
                info!("Session refreshed");
            }
        }

        Ok(token)
    }

    /// Revoke an access or refresh token.
    #[instrument(skip(self, token))]
    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        self.oauth().revoke_token(token).await
    }

    pub(crate) fn require_auth(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::not_authenticated())
        }
    }
}
