//! Asset entity models: one row per generation event.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::variant::Variant;

/// A row from the `assets` table. Each asset records one synthesis call:
/// the provider, the exact prompt, and the stored original image address.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub artwork_id: DbId,
    pub provider: String,
    pub prompt: String,
    pub original_url: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new asset. The owning artwork id is supplied by the
/// catalog writer inside its transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub provider: String,
    pub prompt: String,
    pub original_url: String,
}

/// An asset enriched with its variants, for artwork detail views.
#[derive(Debug, Serialize)]
pub struct AssetWithVariants {
    pub asset: Asset,
    pub variants: Vec<Variant>,
}
