//! OAuth 2.0 token refresh and revocation.
//!
//! Both calls are form POSTs against the token host, which is the instance
//! URL of an authenticated session or the login URL otherwise.

use serde::{Deserialize, Serialize};
use simpleforce_client::{classify, Error, ErrorKind, Response, Result, SfHttpClient};
use tracing::{info, instrument};

/// OAuth client bound to one token host.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: SfHttpClient,
    host: String,
}

impl OAuthClient {
    /// Create an OAuth client for `host` (scheme and authority, no path).
    pub fn new(http: SfHttpClient, host: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    /// The token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/services/oauth2/token", self.host)
    }

    /// The revocation endpoint.
    pub fn revoke_url(&self) -> String {
        format!("{}/services/oauth2/revoke", self.host)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The client secret and refresh token are not logged. A 2xx answer is
    /// returned as is, so check [`Token::has_error`] or use
    /// [`Token::into_result`].
    #[instrument(skip(self, client_secret, refresh_token), fields(url = %self.token_url()))]
    pub async fn refresh_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<Token> {
        let request = self
            .http
            .post(self.token_url())
            .form([
                ("format", "json"),
                ("grant_type", "refresh_token"),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
            ])
            .header("Accept", "application/json");

        let response = check(self.http.send(request).await?).await?;
        let token: Token = response.json().await?;
        Ok(token)
    }

    /// Revoke an access or refresh token.
    ///
    /// Revoking a refresh token also invalidates every access token issued
    /// from it.
    #[instrument(skip(self, token), fields(url = %self.revoke_url()))]
    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        let request = self
            .http
            .post(self.revoke_url())
            .form([("token", token)])
            .header("Accept", "application/json");

        check(self.http.send(request).await?).await?;
        info!("Token revoked");
        Ok(())
    }
}

/// Classify a non-2xx token endpoint answer.
///
/// The token endpoint reports failures as a JSON object
/// (`{"error": .., "error_description": ..}`) rather than the usual error
/// array; that shape surfaces as [`ErrorKind::OAuth`] when the classifier
/// finds nothing better.
async fn check(response: Response) -> Result<Response> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status();
    info!(status, "Token request failed");
    let body = response.bytes().await.unwrap_or_default();

    let classified = classify(status, &body);
    if classified.is_general_failure() {
        if let Ok(token) = serde_json::from_slice::<Token>(&body) {
            if token.has_error() {
                return Err(token.oauth_error());
            }
        }
    }
    Err(Error::remote(status, classified))
}

/// OAuth token payload.
///
/// Every field is optional; Salesforce omits the ones that do not apply.
/// Tokens and the signature are redacted in Debug output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Token {
    /// Identity URL of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Issue time in milliseconds since the epoch, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
    /// Granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// OAuth error code, set when the request was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human readable error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// Refresh token, when one was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Instance the token is valid for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_url: Option<String>,
    /// HMAC signature over `id` and `issued_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// The new access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("issued_at", &self.issued_at)
            .field("scope", &self.scope)
            .field("error", &self.error)
            .field("error_description", &self.error_description)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Token {
    /// Returns true if the payload carries a non-empty `error`.
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// The access token, if present and non-empty.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Fail with [`ErrorKind::OAuth`] if the payload carries an error.
    pub fn into_result(self) -> Result<Token> {
        if self.has_error() {
            Err(self.oauth_error())
        } else {
            Ok(self)
        }
    }

    fn oauth_error(&self) -> Error {
        Error::new(ErrorKind::OAuth {
            error: self.error.clone().unwrap_or_default(),
            description: self.error_description.clone().unwrap_or_default(),
        })
    }
}
