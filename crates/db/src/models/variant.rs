//! Variant entity models: one row per derived representation.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Variant {
    pub id: DbId,
    pub asset_id: DbId,
    /// Persisted format name: `PNG`, `JPG`, or `WEBP`.
    pub format: String,
    pub width: i32,
    pub height: i32,
    pub url: String,
    pub price_cents: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new variant. The owning asset id is supplied by the
/// catalog writer inside its transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVariant {
    pub format: String,
    pub width: i32,
    pub height: i32,
    pub url: String,
    pub price_cents: i64,
}
