//! HTTP response handling.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::classify::classify;
use crate::error::{Error, Result};

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Get the response body as bytes.
    pub async fn bytes(self) -> Result<Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }

    /// Read the whole body, keeping the status code.
    pub async fn into_raw(self) -> Result<RawResponse> {
        let status = self.status();
        let body = self.bytes().await?;
        Ok(RawResponse { status, body })
    }

    /// Stream the body into `dest` chunk by chunk, returning the number of bytes written.
    pub async fn copy_to<W>(mut self, dest: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.inner.chunk().await? {
            dest.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        dest.flush().await?;
        Ok(written)
    }

    /// Turn a non-2xx response into a classified error.
    ///
    /// The full body is read and classified; the body itself is discarded.
    pub async fn error_for_status(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        info!(status, "Request failed");
        let body = self.bytes().await.unwrap_or_default();
        Err(Error::remote(status, classify(status, &body)))
    }
}

/// A fully read response body with its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code (2xx on success).
    pub status: u16,
    /// The response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }
}
