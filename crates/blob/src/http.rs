//! HTTP implementation of [`BlobStore`] against a public blob endpoint.
//!
//! The store speaks a minimal REST contract: `PUT {base}/{key}` with a
//! bearer token and content type, answering `{"url": ...}` with the
//! public address. There is no separate publish step; content is readable
//! as soon as the put succeeds.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{BlobError, BlobStore, PutReceipt};

/// Default per-upload request timeout.
const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Blob store client for one endpoint + access token.
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

/// Response body of a successful put.
#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

impl HttpBlobStore {
    /// Create a store client with the default upload timeout.
    pub fn new(base_url: String, token: String) -> Self {
        Self::with_timeout(base_url, token, DEFAULT_UPLOAD_TIMEOUT)
    }

    /// Create a store client with an explicit upload timeout.
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PutReceipt, BlobError> {
        let size = bytes.len();
        let response = self
            .client
            .put(format!("{}/{}", self.base_url, key))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .timeout(self.timeout)
            .body(bytes)
            .send()
            .await
            .map_err(|e| BlobError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BlobError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PutResponse = response
            .json()
            .await
            .map_err(|e| BlobError::Transport(format!("Malformed store response: {e}")))?;

        tracing::debug!(key, size, url = %parsed.url, "Uploaded blob");

        Ok(PutReceipt { url: parsed.url })
    }
}
