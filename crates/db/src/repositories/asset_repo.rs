//! Repository for the `assets` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::Asset;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, artwork_id, provider, prompt, original_url, created_at";

/// Provides read operations for generation assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all assets for an artwork, oldest first. An artwork's first
    /// asset is its originating generation; later rows are regenerations.
    pub async fn list_by_artwork(
        pool: &PgPool,
        artwork_id: DbId,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE artwork_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(artwork_id)
            .fetch_all(pool)
            .await
    }
}
