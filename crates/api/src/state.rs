//! Shared application state injected into every handler.

use std::sync::Arc;

use atelier_core::styles::StyleRegistry;
use atelier_pipeline::Pipeline;
use sqlx::PgPool;

/// Application state: the database pool for the catalog reader, the style
/// registry, and the configured generation pipeline.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub registry: Arc<StyleRegistry>,
    pub pipeline: Arc<Pipeline>,
}
