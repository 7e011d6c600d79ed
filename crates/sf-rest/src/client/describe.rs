use simpleforce_client::Result;
use tracing::instrument;

use crate::describe::DescribeGlobalResult;

impl super::ForceClient {
    /// List every object in the org with its basic metadata.
    #[instrument(skip(self))]
    pub async fn describe_global(&self) -> Result<DescribeGlobalResult> {
        self.require_auth()?;
        self.client.rest_get("sobjects").await
    }
}
