use simpleforce::rest::ForceConfigBuilder;
use simpleforce::{ForceClient, ForceConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Route library logs to the test output; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const SESSION_ID: &str = "00Dxx0000000001!AQ0AQ";

/// A mocked org answering SOAP login on its own URI.
pub struct MockOrg {
    pub server: MockServer,
}

impl MockOrg {
    pub async fn start() -> Self {
        let org = Self::without_login().await;
        let server = &org.server;

        let server_url = format!("{}/services/Soap/u/43.0/00Dxx0000000001", server.uri());
        Mock::given(method("POST"))
            .and(path("/services/Soap/u/43.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/xml")
                    .set_body_string(login_response(&server_url)),
            )
            .mount(server)
            .await;

        org
    }

    /// An org with nothing mounted yet.
    pub async fn without_login() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// An anonymous client pointed at this org's login host.
    pub fn client(&self) -> ForceClient {
        self.client_with(|builder| builder)
    }

    pub fn client_with(
        &self,
        configure: impl FnOnce(ForceConfigBuilder) -> ForceConfigBuilder,
    ) -> ForceClient {
        let builder = ForceConfig::builder().with_base_url(self.uri());
        ForceClient::new(configure(builder).build()).expect("client should build")
    }
}

fn login_response(server_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com">
  <soapenv:Body>
    <loginResponse>
      <result>
        <serverUrl>{server_url}</serverUrl>
        <sessionId>{SESSION_ID}</sessionId>
        <userId>005xx000001Sv6A</userId>
        <userInfo>
          <userEmail>grace@example.com</userEmail>
          <userFullName>Grace Hopper</userFullName>
          <userName>grace@example.com</userName>
        </userInfo>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}
