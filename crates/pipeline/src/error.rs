//! Pipeline error taxonomy.
//!
//! Each variant is discriminable by the API layer: validation failures
//! are client errors, synthesis failures map onto upstream/timeout
//! statuses, and everything after synthesis is a server-side fault. A run
//! either fully succeeds or fails with catalog state untouched.

use atelier_core::error::CoreError;
use atelier_openai::SynthesisError;

/// Failures a generation run can surface.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid request input (empty title, unknown style, bad aspect).
    /// Raised before any network call.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    /// The synthesis client failed; the inner kind distinguishes timeout,
    /// rejection, and exhausted retries.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Decoding or re-encoding the synthesized image failed. Fatal for
    /// the run; partial variant sets are never persisted.
    #[error("Variant production failed: {0}")]
    Derivative(String),

    /// Content store uploads exhausted their bounded attempts.
    #[error("Content store upload failed after {attempts} attempts: {message}")]
    StoreUpload {
        /// Attempts made, each with a fresh storage key.
        attempts: u32,
        /// Last upload failure.
        message: String,
    },

    /// The catalog transaction failed; already-uploaded blobs are left in
    /// place.
    #[error("Catalog commit failed: {0}")]
    CatalogCommit(String),
}
