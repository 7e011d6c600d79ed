//! Updated-record sync and file download after a password login.

use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::common::MockOrg;

async fn mount_contact(org: &MockOrg, id: &str, last_name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/services/data/v43.0/sobjects/Contact/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "attributes": {"type": "Contact"},
            "Id": id,
            "LastName": last_name
        })))
        .mount(&org.server)
        .await;
}

#[tokio::test]
async fn test_sync_updated_contacts_and_download_attachment() {
    let org = MockOrg::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v43.0/sobjects/Contact/updated/"))
        .and(query_param("start", "2024-03-01T00:00:00+00:00"))
        .and(query_param("end", "2024-03-02T00:00:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ids": ["003A", "003B", "003C", "003D"],
            "latestDateCovered": "2024-03-01T23:59:00.000+0000"
        })))
        .mount(&org.server)
        .await;

    mount_contact(&org, "003A", "Lovelace").await;
    mount_contact(&org, "003B", "Hopper").await;
    mount_contact(&org, "003D", "Hamilton").await;
    Mock::given(method("GET"))
        .and(path("/services/data/v43.0/sobjects/Contact/003C"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
            "errorCode": "ENTITY_IS_DELETED",
            "message": "entity is deleted"
        }])))
        .mount(&org.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/data/v43.0/sobjects/ContentVersion/068A/VersionData"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"name,email\n".to_vec()))
        .mount(&org.server)
        .await;

    let mut client = org.client_with(|builder| builder.with_batch_concurrency(2));
    client
        .login("grace@example.com", "s3cret", "TOKEN")
        .await
        .expect("login should succeed");

    let batch = client
        .fetch_updated(
            "Contact",
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
        )
        .await
        .expect("id listing should succeed");

    assert_eq!(batch.len(), 4);
    let failed: Vec<_> = batch.failures().map(|o| o.id.clone()).collect();
    assert_eq!(failed, vec!["003C".to_string()]);
    let deleted = batch
        .failures()
        .next()
        .and_then(|o| o.result.as_ref().err())
        .and_then(|e| e.classified())
        .map(|c| c.code.as_str());
    assert_eq!(deleted, Some("ENTITY_IS_DELETED"));

    let contacts = batch.into_lenient();
    let names: Vec<Option<&str>> = contacts
        .iter()
        .map(|c| c.as_ref().and_then(|c| c.get_str("LastName")))
        .collect();
    assert_eq!(names, vec![Some("Lovelace"), Some("Hopper"), None, Some("Hamilton")]);

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("contacts.csv");
    let written = client
        .download_file_to_path("068A", &target)
        .await
        .expect("download should succeed");

    assert_eq!(written, 11);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "name,email\n");
}
