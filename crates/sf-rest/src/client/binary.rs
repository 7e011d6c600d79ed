use std::path::Path;

use simpleforce_client::security::url as url_security;
use simpleforce_client::{Response, Result};
use tokio::io::AsyncWrite;
use tracing::{debug, instrument};

impl super::ForceClient {
    /// Stream the binary body of a ContentVersion into `dest`.
    ///
    /// Returns the number of bytes written. A non-2xx answer is classified
    /// and nothing is written.
    #[instrument(skip(self, dest))]
    pub async fn download_file<W>(&self, content_version_id: &str, dest: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let response = self.version_data(content_version_id).await?;
        let written = response.copy_to(dest).await?;
        debug!(bytes = written, "ContentVersion downloaded");
        Ok(written)
    }

    /// Download a ContentVersion into a file at `path`.
    ///
    /// The file is created (or truncated) only once the server has answered
    /// with a 2xx status.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn download_file_to_path(
        &self,
        content_version_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        let response = self.version_data(content_version_id).await?;
        let mut file = tokio::fs::File::create(path.as_ref()).await?;
        let written = response.copy_to(&mut file).await?;
        debug!(bytes = written, "ContentVersion saved");
        Ok(written)
    }

    async fn version_data(&self, content_version_id: &str) -> Result<Response> {
        self.require_auth()?;
        let url = self.client.rest_url(&format!(
            "sobjects/ContentVersion/{}/VersionData",
            url_security::encode_param(content_version_id)
        ));
        let request = self.client.get(&url).header("Accept", "*/*");
        self.client.execute(request).await
    }
}
