//! Pipeline orchestration: one run from request to catalog commit.
//!
//! The chain is sequential — resolve, prompt, synthesize, store original,
//! derive, commit — except for variant production, which encodes and
//! uploads concurrently bounded by the configured worker limit. All
//! validation happens before the first network call, and nothing reaches
//! the catalog unless every variant made it to the content store.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_blob::key::storage_key;
use atelier_blob::{BlobStore, PutReceipt};
use atelier_core::canvas::{Aspect, CanvasSize};
use atelier_core::prompt::build_prompt;
use atelier_core::styles::StyleRegistry;
use atelier_core::types::{DbId, SynthesizedImage};
use atelier_core::variants::{plan_for_widths, VariantSpec, VARIANT_WIDTHS};
use atelier_db::models::artwork::{Artwork, CreateArtwork};
use atelier_db::models::asset::CreateAsset;
use atelier_db::models::variant::CreateVariant;
use atelier_db::repositories::CatalogRepo;
use atelier_openai::{ImagesClient, SynthesisError};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::derivative;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Request / receipt
// ---------------------------------------------------------------------------

/// Inbound trigger for one generation run. Ephemeral; discarded after the
/// run completes or fails.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Artwork title, non-empty, at most 120 characters.
    pub title: String,
    /// Style slug, e.g. `van-gogh`.
    pub style_slug: String,
    /// Optional aspect: `square`, `portrait`, `landscape`, or `auto`.
    pub aspect: Option<String>,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReceipt {
    pub artwork_id: DbId,
    pub original_url: String,
    pub thumbnail_url: String,
}

// ---------------------------------------------------------------------------
// Collaborator seams
// ---------------------------------------------------------------------------

/// The external image generation capability.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Generate one image for the prompt at the given canvas size.
    async fn synthesize(
        &self,
        prompt: &str,
        size: CanvasSize,
    ) -> Result<SynthesizedImage, SynthesisError>;

    /// Provider identifier persisted on assets.
    fn provider_id(&self) -> String;
}

#[async_trait]
impl Synthesizer for ImagesClient {
    async fn synthesize(
        &self,
        prompt: &str,
        size: CanvasSize,
    ) -> Result<SynthesizedImage, SynthesisError> {
        ImagesClient::synthesize(self, prompt, size).await
    }

    fn provider_id(&self) -> String {
        ImagesClient::provider_id(self)
    }
}

/// Catalog commit failure, as surfaced through the [`CatalogSink`] seam.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CommitError(pub String);

/// The transactional catalog writer.
#[async_trait]
pub trait CatalogSink: Send + Sync {
    /// Commit an artwork, its originating asset, and all variants
    /// atomically; returns the committed artwork with its final
    /// thumbnail.
    async fn commit_generation(
        &self,
        draft: &CreateArtwork,
        asset: &CreateAsset,
        variants: &[CreateVariant],
    ) -> Result<Artwork, CommitError>;
}

/// Production catalog sink backed by the Postgres repository layer.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSink for PgCatalog {
    async fn commit_generation(
        &self,
        draft: &CreateArtwork,
        asset: &CreateAsset,
        variants: &[CreateVariant],
    ) -> Result<Artwork, CommitError> {
        CatalogRepo::commit_generation(&self.pool, draft, asset, variants)
            .await
            .map_err(|e| CommitError(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Tunables for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target widths for the derivative plan, smallest first.
    pub variant_widths: Vec<u32>,
    /// Bounded attempts per blob upload; every attempt uses a fresh key.
    pub upload_attempts: u32,
    /// Concurrency bound for variant encode+upload work. Kept at or below
    /// the number of planned width x format pairs.
    pub derive_workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            variant_widths: VARIANT_WIDTHS.to_vec(),
            upload_attempts: 3,
            derive_workers: 6,
        }
    }
}

/// One configured generation pipeline. Cheap to share behind an `Arc`;
/// concurrent runs share no mutable state.
pub struct Pipeline {
    registry: StyleRegistry,
    synthesizer: Arc<dyn Synthesizer>,
    store: Arc<dyn BlobStore>,
    catalog: Arc<dyn CatalogSink>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        registry: StyleRegistry,
        synthesizer: Arc<dyn Synthesizer>,
        store: Arc<dyn BlobStore>,
        catalog: Arc<dyn CatalogSink>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            registry,
            synthesizer,
            store,
            catalog,
            config,
        }
    }

    /// The style registry this pipeline resolves against.
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Execute one generation run.
    ///
    /// Fails fast on invalid input before any network call. Cancelling
    /// the returned future before the commit step leaves the catalog
    /// untouched; blobs uploaded by then are accepted orphans.
    pub async fn run(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReceipt, PipelineError> {
        // 1. Validate and resolve; no I/O yet.
        let style = *self.registry.resolve(&request.style_slug)?;
        let aspect = match request.aspect.as_deref() {
            Some(raw) => Aspect::parse(raw)?,
            None => Aspect::default(),
        };
        let prompt = build_prompt(&style, &request.title)?;
        let canvas = aspect.canvas();
        let title = request.title.trim().to_string();

        tracing::info!(style = style.key, canvas = %canvas, %title, "Starting generation run");

        // 2. Synthesize the original.
        let image = self.synthesizer.synthesize(&prompt, canvas).await?;

        // 3. Store the original bytes.
        let original_ext = extension_for(&image.content_type);
        let original = self
            .upload_with_retry("orig", original_ext, image.bytes.clone(), &image.content_type)
            .await?;

        // 4. Derive and upload every variant.
        let specs = plan_for_widths(&self.config.variant_widths, canvas);
        let variants = self.derive_and_upload(image, &specs).await?;

        // 5. Commit the catalog record.
        let draft = CreateArtwork {
            title,
            artist: style.label.to_string(),
            style_key: style.key.to_string(),
            price_cents: specs.iter().map(|s| s.price_cents).min().unwrap_or(0),
            thumbnail_url: original.url.clone(),
            tags: Vec::new(),
            category: None,
            featured: false,
        };
        let asset = CreateAsset {
            provider: self.synthesizer.provider_id(),
            prompt,
            original_url: original.url.clone(),
        };
        let artwork = self
            .catalog
            .commit_generation(&draft, &asset, &variants)
            .await
            .map_err(|e| PipelineError::CatalogCommit(e.0))?;

        tracing::info!(artwork_id = artwork.id, "Generation run committed");

        Ok(GenerationReceipt {
            artwork_id: artwork.id,
            original_url: original.url,
            thumbnail_url: artwork.thumbnail_url,
        })
    }

    /// Decode the original once, then encode + upload each planned
    /// variant concurrently (bounded), preserving plan order.
    ///
    /// Any single failure fails the whole derive; partial variant sets
    /// never reach the caller.
    async fn derive_and_upload(
        &self,
        image: SynthesizedImage,
        specs: &[VariantSpec],
    ) -> Result<Vec<CreateVariant>, PipelineError> {
        let source = tokio::task::spawn_blocking(move || derivative::decode_source(&image.bytes))
            .await
            .map_err(|e| PipelineError::Derivative(format!("Decode task failed: {e}")))?
            .map_err(|e| PipelineError::Derivative(e.to_string()))?;
        let source = Arc::new(source);

        let uploads = stream::iter(specs.iter().copied().map(|spec| {
            let source = Arc::clone(&source);
            async move {
                let encoded =
                    tokio::task::spawn_blocking(move || derivative::render_variant(&source, &spec))
                        .await
                        .map_err(|e| PipelineError::Derivative(format!("Encode task failed: {e}")))?
                        .map_err(|e| PipelineError::Derivative(e.to_string()))?;

                let receipt = self
                    .upload_with_retry(
                        &spec.width.to_string(),
                        spec.format.extension(),
                        encoded,
                        spec.format.content_type(),
                    )
                    .await?;

                Ok::<CreateVariant, PipelineError>(CreateVariant {
                    format: spec.format.as_str().to_string(),
                    width: spec.width as i32,
                    height: spec.height as i32,
                    url: receipt.url,
                    price_cents: spec.price_cents,
                })
            }
        }))
        .buffered(self.config.derive_workers.max(1))
        .try_collect::<Vec<_>>()
        .await?;

        Ok(uploads)
    }

    /// Upload with bounded attempts. Every attempt generates a fresh
    /// storage key, so a retry after a partial upload cannot collide with
    /// an earlier one.
    async fn upload_with_retry(
        &self,
        descriptor: &str,
        extension: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PutReceipt, PipelineError> {
        let attempts = self.config.upload_attempts.max(1);
        let mut last_failure = String::new();

        for attempt in 1..=attempts {
            let key = storage_key(descriptor, extension);
            match self.store.put(&key, bytes.clone(), content_type).await {
                Ok(receipt) => return Ok(receipt),
                Err(e) => {
                    tracing::warn!(attempt, %key, error = %e, "Blob upload attempt failed");
                    last_failure = e.to_string();
                }
            }
        }

        Err(PipelineError::StoreUpload {
            attempts,
            message: last_failure,
        })
    }
}

/// File extension for a synthesized content type.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_content_type() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/webp"), "webp");
        assert_eq!(extension_for("application/octet-stream"), "png");
    }
}
