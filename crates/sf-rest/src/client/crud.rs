use bytes::Bytes;
use simpleforce_client::security::{soql, url as url_security};
use simpleforce_client::{ClassifiedError, Error, ErrorKind, RequestMethod, Result};
use tracing::instrument;

use crate::record::{BoundRecord, RecordSession};
use crate::sobject::{CreateResult, SObject};

impl super::ForceClient {
    /// Create an empty record of `type_name`, bound to this client.
    pub fn sobject(&self, type_name: &str) -> BoundRecord<'_, Self> {
        BoundRecord::new(SObject::of_type(type_name), self)
    }

    /// Get a record by id.
    #[instrument(skip(self))]
    pub async fn get_record(&self, type_name: &str, id: &str) -> Result<SObject> {
        self.require_auth()?;
        let url = self.client.rest_url(&record_path(type_name, Some(id))?);
        let raw = self.client.request(RequestMethod::Get, &url, None).await?;

        let mut record: SObject = raw.json()?;
        if record.type_name().is_none() {
            record.set_type(type_name);
        }
        Ok(record)
    }

    /// Create a record. `attributes` and `Id` are not sent.
    #[instrument(skip(self, record))]
    pub async fn create_record(&self, type_name: &str, record: &SObject) -> Result<CreateResult> {
        self.require_auth()?;
        let url = self.client.rest_url(&record_path(type_name, None)?);
        let body = Bytes::from(serde_json::to_vec(&record.write_payload())?);
        let raw = self
            .client
            .request(RequestMethod::Post, &url, Some(body))
            .await?;

        let result: CreateResult = raw.json()?;
        if result.success {
            Ok(result)
        } else {
            let message = result
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            let code = result
                .errors
                .first()
                .map(|e| e.status_code.clone())
                .unwrap_or_else(|| "CREATE_FAILED".to_string());
            Err(Error::remote(
                raw.status,
                ClassifiedError::new(code, message).with_status(raw.status),
            ))
        }
    }

    /// Update the fields of a record. `attributes` and `Id` are not sent.
    #[instrument(skip(self, record))]
    pub async fn update_record(&self, type_name: &str, id: &str, record: &SObject) -> Result<()> {
        self.require_auth()?;
        let url = self.client.rest_url(&record_path(type_name, Some(id))?);
        let body = Bytes::from(serde_json::to_vec(&record.write_payload())?);
        self.client
            .request(RequestMethod::Patch, &url, Some(body))
            .await?;
        Ok(())
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete_record(&self, type_name: &str, id: &str) -> Result<()> {
        self.require_auth()?;
        let url = self.client.rest_url(&record_path(type_name, Some(id))?);
        self.client.request(RequestMethod::Delete, &url, None).await?;
        Ok(())
    }
}

impl RecordSession for super::ForceClient {
    fn get_record(
        &self,
        type_name: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<SObject>> + Send {
        super::ForceClient::get_record(self, type_name, id)
    }

    fn create_record(
        &self,
        type_name: &str,
        record: &SObject,
    ) -> impl std::future::Future<Output = Result<CreateResult>> + Send {
        super::ForceClient::create_record(self, type_name, record)
    }

    fn update_record(
        &self,
        type_name: &str,
        id: &str,
        record: &SObject,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        super::ForceClient::update_record(self, type_name, id, record)
    }

    fn delete_record(
        &self,
        type_name: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        super::ForceClient::delete_record(self, type_name, id)
    }
}

/// `sobjects/{type}/` or `sobjects/{type}/{id}`, with the type validated
/// and the id percent-encoded.
pub(super) fn record_path(type_name: &str, id: Option<&str>) -> Result<String> {
    if !soql::is_safe_sobject_name(type_name) {
        return Err(Error::new(ErrorKind::InvalidInput(
            "INVALID_SOBJECT: Invalid SObject name".to_string(),
        )));
    }
    Ok(match id {
        Some(id) => format!("sobjects/{}/{}", type_name, url_security::encode_param(id)),
        None => format!("sobjects/{}/", type_name),
    })
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::tests::{authenticated, config};
    use super::super::ForceClient;
    use super::*;

    #[test]
    fn test_record_path() {
        assert_eq!(
            record_path("Account", Some("001A")).unwrap(),
            "sobjects/Account/001A"
        );
        assert_eq!(record_path("Account", None).unwrap(), "sobjects/Account/");
        assert_eq!(
            record_path("Account", Some("../../limits")).unwrap(),
            "sobjects/Account/..%2F..%2Flimits"
        );

        let err = record_path("Bad'; DROP--", Some("1")).unwrap_err();
        assert!(err.to_string().contains("INVALID_SOBJECT"));
    }

    #[tokio::test]
    async fn test_get_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v43.0/sobjects/Account/001A"))
            .and(header("Authorization", "Bearer 00Dxx!session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "attributes": {"type": "Account"},
                "Id": "001A",
                "Name": "Acme"
            })))
            .mount(&mock_server)
            .await;

        let client = authenticated(&mock_server.uri());
        let record = client.get_record("Account", "001A").await.unwrap();

        assert_eq!(record.id(), Some("001A"));
        assert_eq!(record.type_name(), Some("Account"));
        assert_eq!(record.get_str("Name"), Some("Acme"));
    }

    #[tokio::test]
    async fn test_get_record_not_found_is_classified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v43.0/sobjects/Account/001Z"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
                "errorCode": "NOT_FOUND",
                "message": "The requested resource does not exist"
            }])))
            .mount(&mock_server)
            .await;

        let client = authenticated(&mock_server.uri());
        let err = client.get_record("Account", "001Z").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.classified().unwrap().code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_crud_requires_authentication() {
        let client = ForceClient::new(config("http://127.0.0.1:9")).unwrap();

        assert!(client.get_record("Account", "001A").await.unwrap_err().is_auth_error());
        assert!(client
            .delete_record("Account", "001A")
            .await
            .unwrap_err()
            .is_auth_error());
    }

    #[tokio::test]
    async fn test_bound_record_save_creates_and_updates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v43.0/sobjects/Account/"))
            .and(body_json(serde_json::json!({"Name": "Acme"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "001NEW",
                "success": true,
                "errors": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v43.0/sobjects/Account/001NEW"))
            .and(body_json(serde_json::json!({"Name": "Acme Corp"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authenticated(&mock_server.uri());
        let mut account = client.sobject("Account");
        account.set("Name", "Acme");
        account.save().await.unwrap();
        assert_eq!(account.id(), Some("001NEW"));

        account.set("Name", "Acme Corp");
        account.save().await.unwrap();
    }

    #[tokio::test]
    async fn test_bound_record_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/services/data/v43.0/sobjects/Contact/003A"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authenticated(&mock_server.uri());
        let mut contact = client.sobject("Contact");
        contact.set("Id", "003A");
        contact.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_failure_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v43.0/sobjects/Account/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "",
                "success": false,
                "errors": [{"statusCode": "REQUIRED_FIELD_MISSING", "message": "Required fields are missing: [Name]", "fields": ["Name"]}]
            })))
            .mount(&mock_server)
            .await;

        let client = authenticated(&mock_server.uri());
        let err = client
            .create_record("Account", &SObject::of_type("Account"))
            .await
            .unwrap_err();

        assert_eq!(err.classified().unwrap().code, "REQUIRED_FIELD_MISSING");
    }
}
