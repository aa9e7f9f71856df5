//! Image synthesis client for the OpenAI Images API.
//!
//! [`ImagesClient`] issues one generation call per pipeline run under a
//! hard deadline, retries transient failures with linear backoff, and
//! normalizes the provider's two response shapes (inline base64 bytes vs.
//! a fetchable URL) into a single [`SynthesizedImage`] result.
//!
//! [`SynthesizedImage`]: atelier_core::types::SynthesizedImage

pub mod client;
pub mod payload;
pub mod retry;

pub use client::{ImagesClient, SynthesisError};
pub use payload::ImagePayload;
pub use retry::RetryPolicy;
