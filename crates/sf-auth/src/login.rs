//! SOAP password login.
//!
//! Signs in with username, password and security token against the partner
//! SOAP endpoint and returns the session id, instance URL and user details.

use serde::Deserialize;
use simpleforce_client::security::xml::escape;
use simpleforce_client::{classify, Error, ErrorKind, Result, SfHttpClient};
use tracing::{info, instrument};

use crate::credentials::PasswordCredentials;

/// The signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    /// Salesforce user id.
    pub id: String,
    /// Login name.
    pub name: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
}

/// Outcome of a successful login.
///
/// The session id is redacted in Debug output.
#[derive(Clone)]
pub struct LoginResult {
    /// Session id, used as the bearer token for REST calls.
    pub session_id: String,
    /// SOAP server URL returned by the login call.
    pub server_url: String,
    /// Scheme, host and port of `server_url`.
    pub instance_url: String,
    /// The signed-in user.
    pub user: UserInfo,
}

impl std::fmt::Debug for LoginResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResult")
            .field("session_id", &"[REDACTED]")
            .field("server_url", &self.server_url)
            .field("instance_url", &self.instance_url)
            .field("user", &self.user)
            .finish()
    }
}

/// Password login against `{base_url}/services/Soap/u/{api_version}`.
#[derive(Debug, Clone)]
pub struct PasswordLogin {
    http: SfHttpClient,
    base_url: String,
    client_id: String,
    api_version: String,
}

impl PasswordLogin {
    /// Create a login flow for the given login host.
    pub fn new(
        http: SfHttpClient,
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            api_version: simpleforce_client::normalize_api_version(&api_version.into()),
        }
    }

    /// The SOAP login endpoint.
    pub fn login_url(&self) -> String {
        format!("{}/services/Soap/u/{}", self.base_url, self.api_version)
    }

    /// Sign in. The security token may be empty when the caller's IP is trusted.
    ///
    /// A non-200 answer is classified (usually a SOAP fault such as
    /// `INVALID_LOGIN`) and returned as [`ErrorKind::Remote`].
    #[instrument(skip(self, password, security_token), fields(url = %self.login_url()))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> Result<LoginResult> {
        let envelope = self.envelope(username, password, security_token);

        let request = self
            .http
            .post(self.login_url())
            .xml(envelope)
            .header("charset", "UTF-8")
            .header("SOAPAction", "login");

        let response = self.http.send(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != 200 {
            return Err(Error::remote(status, classify(status, &body)));
        }

        let text = std::str::from_utf8(&body).map_err(|e| {
            Error::with_source(ErrorKind::Xml("login response is not UTF-8".to_string()), e)
        })?;
        let envelope: LoginEnvelope = quick_xml::de::from_str(text)?;
        let result = envelope.body.login_response.result;

        let instance_url = instance_url_of(&result.server_url)?;
        let user = UserInfo {
            id: result.user_id,
            name: result.user_info.user_name,
            full_name: result.user_info.user_full_name,
            email: result.user_info.user_email,
        };

        info!("User {} authenticated", user.name);

        Ok(LoginResult {
            session_id: result.session_id,
            server_url: result.server_url,
            instance_url,
            user,
        })
    }

    /// Sign in with stored credentials.
    pub async fn login_with(&self, credentials: &PasswordCredentials) -> Result<LoginResult> {
        self.login(
            credentials.username(),
            credentials.password(),
            credentials.security_token(),
        )
        .await
    }

    fn envelope(&self, username: &str, password: &str, security_token: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}{token}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
            client = escape(&self.client_id),
            username = escape(username),
            password = escape(password),
            token = escape(security_token),
        )
    }
}

/// Scheme, host and non-default port of a server URL.
pub fn instance_url_of(server_url: &str) -> Result<String> {
    let parsed = url::Url::parse(server_url)?;
    if parsed.host_str().is_none() {
        return Err(Error::new(ErrorKind::InvalidUrl(format!(
            "no host in server URL {server_url}"
        ))));
    }
    Ok(parsed.origin().ascii_serialization())
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    #[serde(rename = "Body")]
    body: LoginBody,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(rename = "loginResponse")]
    login_response: LoginResponse,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    result: LoginResponseResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponseResult {
    server_url: String,
    session_id: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    user_info: LoginUserInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginUserInfo {
    #[serde(default)]
    user_email: String,
    #[serde(default)]
    user_full_name: String,
    #[serde(default)]
    user_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleforce_client::ClientConfig;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn login_response(server_url: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soapenv:Body>
    <loginResponse>
      <result>
        <metadataServerUrl>{server_url}</metadataServerUrl>
        <passwordExpired>false</passwordExpired>
        <sandbox>false</sandbox>
        <serverUrl>{server_url}</serverUrl>
        <sessionId>00Dxx0000001gEF!AQ4AQFakeSession</sessionId>
        <userId>005xx000001SvKZAA0</userId>
        <userInfo>
          <accessibilityMode>false</accessibilityMode>
          <userEmail>jdoe@example.com</userEmail>
          <userFullName>Jane Doe</userFullName>
          <userId>005xx000001SvKZAA0</userId>
          <userName>jdoe@example.com.dev</userName>
        </userInfo>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#
        )
    }

    const INVALID_LOGIN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:sf="urn:fault.partner.soap.sforce.com">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>INVALID_LOGIN</faultcode>
      <faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;

    fn http() -> SfHttpClient {
        SfHttpClient::new(ClientConfig::builder().with_tracing(false).build()).unwrap()
    }

    #[test]
    fn test_login_url() {
        let login = PasswordLogin::new(http(), "https://login.salesforce.com/", "simpleforce", "v43.0");
        assert_eq!(
            login.login_url(),
            "https://login.salesforce.com/services/Soap/u/43.0"
        );
    }

    #[test]
    fn test_envelope_escapes_credentials() {
        let login = PasswordLogin::new(http(), "https://login.salesforce.com", "my<app>", "43.0");
        let envelope = login.envelope("a&b@example.com", "p<ss", "tok'en");

        assert!(envelope.contains("<urn:client>my&lt;app&gt;</urn:client>"));
        assert!(envelope.contains("<n1:username>a&amp;b@example.com</n1:username>"));
        assert!(envelope.contains("<n1:password>p&lt;sstok&apos;en</n1:password>"));
    }

    #[test]
    fn test_instance_url_of() {
        assert_eq!(
            instance_url_of("https://na1.salesforce.com/services/Soap/u/43.0/00Dxx").unwrap(),
            "https://na1.salesforce.com"
        );
        assert_eq!(
            instance_url_of("http://127.0.0.1:8080/services/Soap/u/43.0").unwrap(),
            "http://127.0.0.1:8080"
        );
        assert!(instance_url_of("not a url").is_err());
    }

    #[tokio::test]
    async fn test_login_success() {
        let mock_server = MockServer::start().await;
        let server_url = format!("{}/services/Soap/u/43.0/00Dxx0000001gEF", mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/services/Soap/u/43.0"))
            .and(header("SOAPAction", "login"))
            .and(header("Content-Type", "text/xml"))
            .and(body_string_contains("<n1:password>secrettoken</n1:password>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(login_response(&server_url)))
            .mount(&mock_server)
            .await;

        let login = PasswordLogin::new(http(), mock_server.uri(), "simpleforce", "43.0");
        let result = login
            .login("jdoe@example.com.dev", "secret", "token")
            .await
            .unwrap();

        assert_eq!(result.session_id, "00Dxx0000001gEF!AQ4AQFakeSession");
        assert_eq!(result.instance_url, mock_server.uri());
        assert_eq!(result.server_url, server_url);
        assert_eq!(
            result.user,
            UserInfo {
                id: "005xx000001SvKZAA0".to_string(),
                name: "jdoe@example.com.dev".to_string(),
                full_name: "Jane Doe".to_string(),
                email: "jdoe@example.com".to_string(),
            }
        );
        assert!(!format!("{result:?}").contains("FakeSession"));
    }

    #[tokio::test]
    async fn test_login_fault_is_classified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/Soap/u/43.0"))
            .respond_with(ResponseTemplate::new(500).set_body_string(INVALID_LOGIN))
            .mount(&mock_server)
            .await;

        let login = PasswordLogin::new(http(), mock_server.uri(), "simpleforce", "43.0");
        let err = login.login("jdoe", "wrong", "").await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        let classified = err.classified().unwrap();
        assert_eq!(classified.code, "INVALID_LOGIN");
        assert!(classified.message.starts_with("INVALID_LOGIN:"));
        assert!(!err.to_string().contains("<soapenv"));
    }

    #[tokio::test]
    async fn test_login_malformed_body_is_xml_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/Soap/u/43.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let login = PasswordLogin::new(http(), mock_server.uri(), "simpleforce", "43.0");
        let err = login.login("jdoe", "secret", "").await.unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Xml(_)));
    }
}
