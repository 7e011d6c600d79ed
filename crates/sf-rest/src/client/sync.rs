use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::{self, StreamExt};
use simpleforce_client::security::url as url_security;
use simpleforce_client::{Error, ErrorKind, RequestMethod, Result};
use tracing::{debug, instrument, warn};

use super::crud::record_path;
use crate::batch::{BatchFetch, FetchOutcome, UpdatedRecords};

impl super::ForceClient {
    /// Fetch every record of `type_name` created or updated between `start`
    /// and `end`.
    ///
    /// The ids come from `sobjects/{type}/updated/`; each record is then
    /// fetched with at most [`crate::ForceConfig::batch_concurrency`]
    /// requests in flight. A failed record fetch is logged and kept in the
    /// returned [`BatchFetch`]; it does not fail the call.
    ///
    /// A retryable status on the id listing is reported as
    /// [`ErrorKind::Retry`]; a listing without an `ids` array is a
    /// [`ErrorKind::Failure`].
    #[instrument(skip(self, start, end), fields(start = %start, end = %end))]
    pub async fn fetch_updated(
        &self,
        type_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BatchFetch> {
        self.require_auth()?;

        let path = format!(
            "{}updated/?start={}&end={}",
            record_path(type_name, None)?,
            url_security::encode_param(&start.to_rfc3339_opts(SecondsFormat::Secs, false)),
            url_security::encode_param(&end.to_rfc3339_opts(SecondsFormat::Secs, false)),
        );
        let url = self.client.rest_url(&path);

        let raw = self
            .client
            .request(RequestMethod::Get, &url, None)
            .await
            .map_err(Error::into_retry_signal)?;

        let updated: UpdatedRecords = serde_json::from_slice(&raw.body).map_err(|e| {
            Error::with_source(
                ErrorKind::Failure("updated records response has no ids list".to_string()),
                e,
            )
        })?;

        let width = self.config.batch_concurrency.max(1);
        debug!(count = updated.ids.len(), width, "Fetching updated records");

        let outcomes: Vec<FetchOutcome> = stream::iter(updated.ids.into_iter().enumerate())
            .map(|(index, id)| async move {
                let result = self.get_record(type_name, &id).await;
                if let Err(ref error) = result {
                    warn!(index, id = %id, error = %error, "Failed to fetch updated record");
                }
                FetchOutcome { index, id, result }
            })
            .buffer_unordered(width)
            .collect()
            .await;

        Ok(BatchFetch::new(updated.latest_date_covered, outcomes))
    }
}
