//! Transactional catalog writer for the generation pipeline.
//!
//! [`CatalogRepo::commit_generation`] is the only multi-row write in the
//! system: the artwork, its originating asset, and every variant become
//! visible together or not at all.

use atelier_core::variants::VariantFormat;
use sqlx::PgPool;

use crate::models::artwork::{Artwork, CreateArtwork, DEFAULT_CATEGORY, STATUS_PUBLISHED};
use crate::models::asset::{Asset, CreateAsset};
use crate::models::variant::CreateVariant;
use crate::repositories::artwork_repo;
use crate::repositories::asset_repo;

/// Writes one completed generation into the catalog.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Commit an artwork, its originating asset, and all variants in one
    /// transaction, then repoint the artwork thumbnail at the medium-tier
    /// PNG variant.
    ///
    /// Sequencing inside the transaction:
    /// 1. insert the artwork as `PUBLISHED` with the provisional thumbnail
    ///    (the original image address);
    /// 2. insert the asset referencing it;
    /// 3. insert every variant referencing the asset;
    /// 4. update the thumbnail to the smallest-width PNG variant.
    ///
    /// If any step fails the transaction rolls back and no row of this
    /// call remains visible. Blobs already uploaded to the content store
    /// are not touched.
    pub async fn commit_generation(
        pool: &PgPool,
        draft: &CreateArtwork,
        asset: &CreateAsset,
        variants: &[CreateVariant],
    ) -> Result<Artwork, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_artwork = format!(
            "INSERT INTO artworks \
                (title, artist, style_key, status, price_cents, thumbnail_url, \
                 tags, category, featured) \
             VALUES ($1, $2, $3, '{STATUS_PUBLISHED}', $4, $5, $6, COALESCE($7, '{DEFAULT_CATEGORY}'), $8) \
             RETURNING {columns}",
            columns = artwork_repo::COLUMNS,
        );
        let artwork = sqlx::query_as::<_, Artwork>(&insert_artwork)
            .bind(&draft.title)
            .bind(&draft.artist)
            .bind(&draft.style_key)
            .bind(draft.price_cents)
            .bind(&draft.thumbnail_url)
            .bind(&draft.tags)
            .bind(draft.category.as_deref())
            .bind(draft.featured)
            .fetch_one(&mut *tx)
            .await?;

        let insert_asset = format!(
            "INSERT INTO assets (artwork_id, provider, prompt, original_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {columns}",
            columns = asset_repo::COLUMNS,
        );
        let asset = sqlx::query_as::<_, Asset>(&insert_asset)
            .bind(artwork.id)
            .bind(&asset.provider)
            .bind(&asset.prompt)
            .bind(&asset.original_url)
            .fetch_one(&mut *tx)
            .await?;

        for variant in variants {
            sqlx::query(
                "INSERT INTO variants (asset_id, format, width, height, url, price_cents) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(asset.id)
            .bind(&variant.format)
            .bind(variant.width)
            .bind(variant.height)
            .bind(&variant.url)
            .bind(variant.price_cents)
            .execute(&mut *tx)
            .await?;
        }

        // Final display thumbnail: the medium-tier (smallest width) PNG
        // variant, falling back to the provisional original if the plan
        // carried no PNG.
        let artwork = match thumbnail_url(variants) {
            Some(url) => {
                let update = format!(
                    "UPDATE artworks SET thumbnail_url = $2, updated_at = NOW() \
                     WHERE id = $1 \
                     RETURNING {columns}",
                    columns = artwork_repo::COLUMNS,
                );
                sqlx::query_as::<_, Artwork>(&update)
                    .bind(artwork.id)
                    .bind(url)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => artwork,
        };

        tx.commit().await?;

        tracing::info!(
            artwork_id = artwork.id,
            asset_id = asset.id,
            variant_count = variants.len(),
            "Committed generation to catalog",
        );

        Ok(artwork)
    }
}

/// Pick the display thumbnail from a variant set: the smallest-width PNG.
fn thumbnail_url(variants: &[CreateVariant]) -> Option<&str> {
    variants
        .iter()
        .filter(|v| v.format == VariantFormat::Png.as_str())
        .min_by_key(|v| v.width)
        .map(|v| v.url.as_str())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(format: &str, width: i32, url: &str) -> CreateVariant {
        CreateVariant {
            format: format.to_string(),
            width,
            height: width,
            url: url.to_string(),
            price_cents: 1900,
        }
    }

    #[test]
    fn thumbnail_prefers_smallest_png() {
        let variants = vec![
            variant("JPG", 1024, "jpg-1024"),
            variant("PNG", 2048, "png-2048"),
            variant("PNG", 1024, "png-1024"),
            variant("WEBP", 1024, "webp-1024"),
        ];
        assert_eq!(thumbnail_url(&variants), Some("png-1024"));
    }

    #[test]
    fn thumbnail_none_without_png() {
        let variants = vec![variant("JPG", 1024, "jpg-1024")];
        assert_eq!(thumbnail_url(&variants), None);
    }
}
