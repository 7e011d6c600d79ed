use serde::de::DeserializeOwned;
use simpleforce_client::{Error, ErrorKind, QueryResult, RequestMethod, Result};
use tracing::instrument;

use crate::record::BoundRecord;
use crate::sobject::SObject;

impl super::ForceClient {
    /// Execute a SOQL query, or fetch the next page of an earlier one.
    ///
    /// `q` is either SOQL or the `nextRecordsUrl` of a previous result
    /// (anything starting with `/services/data`). Records come back bound to
    /// this client so they can be refreshed, saved or deleted.
    ///
    /// A retryable status (500, 503, 403) is reported as
    /// [`ErrorKind::Retry`].
    ///
    /// # Security
    ///
    /// **IMPORTANT**: values spliced into the WHERE clause must be escaped by
    /// the caller; `q` is sent as is.
    #[instrument(skip(self))]
    pub async fn query(&self, q: &str) -> Result<QueryResult<BoundRecord<'_, Self>>> {
        let result: QueryResult<SObject> = self.query_as(q).await?;
        Ok(result.map_records(|record| BoundRecord::new(record, self)))
    }

    /// Execute a SOQL query and deserialize the records into `T`.
    #[instrument(skip(self))]
    pub async fn query_as<T: DeserializeOwned>(&self, q: &str) -> Result<QueryResult<T>> {
        self.require_auth()?;

        let url = self.query_url(q);
        let raw = self
            .client
            .request(RequestMethod::Get, &url, None)
            .await
            .map_err(Error::into_retry_signal)?;

        serde_json::from_slice(&raw.body).map_err(|e| {
            Error::with_source(
                ErrorKind::Failure("query response could not be decoded".to_string()),
                e,
            )
        })
    }

    /// The URL `query` would call for `q`.
    pub fn query_url(&self, q: &str) -> String {
        if q.starts_with("/services/data") {
            return format!("{}{}", self.client.instance_url(), q);
        }

        let endpoint = if self.config.use_tooling_api {
            self.client.tooling_url("query")
        } else {
            self.client.rest_url("query")
        };
        format!("{}?q={}", endpoint, urlencoding::encode(q))
    }
}
