//! Repository for the `artworks` table, including catalog search.

use atelier_core::types::DbId;
use atelier_core::variants::RESERVED_TAGS;
use sqlx::PgPool;

use crate::models::artwork::{
    Artwork, ArtworkWithAssets, CatalogFilter, CatalogPage, CatalogSort, PageRequest,
    STATUS_PUBLISHED,
};
use crate::models::asset::AssetWithVariants;
use crate::repositories::{AssetRepo, VariantRepo};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, title, artist, style_key, status, price_cents, \
    thumbnail_url, tags, category, featured, created_at, updated_at";

/// Provides read operations over the artwork catalog.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// Find an artwork by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = $1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an artwork by ID, enriched with its assets (oldest first) and
    /// each asset's variants.
    pub async fn find_with_assets(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArtworkWithAssets>, sqlx::Error> {
        let Some(artwork) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let assets = AssetRepo::list_by_artwork(pool, artwork.id).await?;
        let mut enriched = Vec::with_capacity(assets.len());
        for asset in assets {
            let variants = VariantRepo::list_by_asset(pool, asset.id).await?;
            enriched.push(AssetWithVariants { asset, variants });
        }

        Ok(Some(ArtworkWithAssets {
            artwork,
            assets: enriched,
        }))
    }

    /// Newest published artworks that have at least one asset, excluding
    /// reserved diagnostic tags. Used for "new drops" strips.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Artwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artworks \
             WHERE status = '{STATUS_PUBLISHED}' \
               AND NOT (tags && $1) \
               AND EXISTS (SELECT 1 FROM assets WHERE assets.artwork_id = artworks.id) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(reserved_tags())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Search the catalog with optional filters, a sort order, and
    /// 1-indexed pagination.
    ///
    /// Only `PUBLISHED` rows are visible, and rows carrying a reserved
    /// diagnostic tag are always excluded. `total` counts every matching
    /// row regardless of the requested page.
    pub async fn search(
        pool: &PgPool,
        filter: &CatalogFilter,
        sort: CatalogSort,
        page: PageRequest,
    ) -> Result<CatalogPage, sqlx::Error> {
        // Build dynamic WHERE clauses. $1 is always the reserved-tag list.
        let mut conditions = vec![
            format!("status = '{STATUS_PUBLISHED}'"),
            "NOT (tags && $1)".to_string(),
        ];
        let mut bind_idx = 2u32;

        if filter.text.is_some() {
            conditions.push(format!(
                "(title ILIKE ${bind_idx} OR artist ILIKE ${bind_idx} \
                 OR EXISTS (SELECT 1 FROM unnest(tags) tag WHERE tag ILIKE ${bind_idx}))"
            ));
            bind_idx += 1;
        }
        if filter.style_key.is_some() {
            conditions.push(format!("style_key = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.tag.is_some() {
            conditions.push(format!("${bind_idx} = ANY(tags)"));
            bind_idx += 1;
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        // Total matching rows, independent of pagination.
        let count_query = format!("SELECT COUNT(*) FROM artworks {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query).bind(reserved_tags());
        if let Some(ref text) = filter.text {
            count = count.bind(format!("%{text}%"));
        }
        if let Some(ref style_key) = filter.style_key {
            count = count.bind(style_key);
        }
        if let Some(ref category) = filter.category {
            count = count.bind(category);
        }
        if let Some(ref tag) = filter.tag {
            count = count.bind(tag);
        }
        let total = count.fetch_one(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM artworks {where_clause} \
             ORDER BY {order} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            order = sort.order_clause(),
            limit_idx = bind_idx,
            offset_idx = bind_idx + 1,
        );
        let mut items = sqlx::query_as::<_, Artwork>(&query).bind(reserved_tags());
        if let Some(ref text) = filter.text {
            items = items.bind(format!("%{text}%"));
        }
        if let Some(ref style_key) = filter.style_key {
            items = items.bind(style_key);
        }
        if let Some(ref category) = filter.category {
            items = items.bind(category);
        }
        if let Some(ref tag) = filter.tag {
            items = items.bind(tag);
        }
        let items = items
            .bind(page.per_page)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(CatalogPage {
            items,
            total,
            page: page.page,
            page_count: page.page_count(total),
        })
    }
}

/// The reserved diagnostic tag list as an owned vec for array binding.
fn reserved_tags() -> Vec<String> {
    RESERVED_TAGS.iter().map(|t| t.to_string()).collect()
}
