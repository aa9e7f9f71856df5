//! Shared type aliases and ephemeral value types.

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Raw image bytes produced by one synthesis call.
///
/// Owned exclusively by the pipeline run that produced it; never shared
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct SynthesizedImage {
    /// Encoded image data exactly as returned (or fetched) from the provider.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. `image/png`.
    pub content_type: String,
}
