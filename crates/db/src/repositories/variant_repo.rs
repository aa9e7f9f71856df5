//! Repository for the `variants` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::variant::Variant;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, asset_id, format, width, height, url, price_cents, created_at";

/// Provides read operations for derived variants.
pub struct VariantRepo;

impl VariantRepo {
    /// List all variants for an asset, smallest width first, formats in
    /// name order within a width.
    pub async fn list_by_asset(pool: &PgPool, asset_id: DbId) -> Result<Vec<Variant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM variants \
             WHERE asset_id = $1 \
             ORDER BY width ASC, format ASC"
        );
        sqlx::query_as::<_, Variant>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }
}
