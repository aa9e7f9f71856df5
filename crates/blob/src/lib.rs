//! Content store client: public blob storage addressed by key.
//!
//! The store is an opaque capability behind the [`BlobStore`] trait: a
//! successful `put` makes the content publicly readable at the returned
//! URL immediately. Upload retry belongs to the caller, which generates a
//! fresh key per attempt ([`key::storage_key`]) so a retry after a partial
//! upload can never collide with the first try.

pub mod http;
pub mod key;

use async_trait::async_trait;

pub use http::HttpBlobStore;

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct PutReceipt {
    /// Publicly-resolvable address of the uploaded content.
    pub url: String,
}

/// Errors from the content store.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The upload request itself failed (network, DNS, TLS, timeout).
    #[error("Blob upload failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("Blob store returned {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// An opaque public-blob storage capability.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` under `key` and return its public address.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PutReceipt, BlobError>;
}
