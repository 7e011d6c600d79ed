//! Session lifecycle: login, query, record round trip, refresh and revoke.

use super::common::{MockOrg, SESSION_ID};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_query_and_save() {
    let org = MockOrg::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v43.0/query"))
        .and(query_param("q", "SELECT Id, Name FROM Account"))
        .and(header("Authorization", format!("Bearer {SESSION_ID}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalSize": 1,
            "done": true,
            "records": [{
                "attributes": {"type": "Account", "url": "/services/data/v43.0/sobjects/Account/001A"},
                "Id": "001A",
                "Name": "Acme"
            }]
        })))
        .mount(&org.server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/services/data/v43.0/sobjects/Account/001A"))
        .and(wiremock::matchers::body_json(serde_json::json!({"Name": "Acme Corp"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&org.server)
        .await;

    let mut client = org.client();
    client
        .login("grace@example.com", "s3cret", "TOKEN")
        .await
        .expect("login should succeed");

    assert!(client.is_authenticated());
    assert_eq!(client.instance_url(), org.uri());
    assert_eq!(client.user().map(|u| u.full_name.as_str()), Some("Grace Hopper"));

    let result = client
        .query("SELECT Id, Name FROM Account")
        .await
        .expect("query should succeed");
    assert!(result.done);

    let mut account = result.records.into_iter().next().expect("one record");
    account.set("Name", "Acme Corp");
    account.save().await.expect("save should update");
}

#[tokio::test]
async fn test_login_fault_is_classified() {
    let org = MockOrg::without_login().await;
    Mock::given(method("POST"))
        .and(path("/services/Soap/u/43.0"))
        .and(body_string_contains("locked@example.com"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>INVALID_LOGIN</faultcode>
      <faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#,
        ))
        .mount(&org.server)
        .await;

    let mut client = org.client();
    let err = client
        .login("locked@example.com", "wrong", "")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_restored_session_refresh_and_revoke() {
    let org = MockOrg::start().await;

    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "00Dxx!refreshed",
            "instance_url": org.uri(),
            "token_type": "Bearer"
        })))
        .mount(&org.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/oauth2/revoke"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&org.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/data/v43.0/sobjects"))
        .and(header("Authorization", "Bearer 00Dxx!refreshed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "encoding": "UTF-8",
            "maxBatchSize": 200,
            "sobjects": [{"name": "Account", "label": "Account"}]
        })))
        .mount(&org.server)
        .await;

    let mut client = org.client();
    client.set_session("00Dxx!stale", org.uri());

    let token = client
        .refresh_token("client-id", "client-secret", "refresh-me")
        .await
        .expect("refresh should succeed");
    assert!(!token.has_error());
    assert_eq!(client.session_id(), "00Dxx!refreshed");

    let describe = client.describe_global().await.expect("describe should succeed");
    assert!(describe.find("account").is_some());

    client
        .revoke_token("00Dxx!refreshed")
        .await
        .expect("revoke should succeed");
}
