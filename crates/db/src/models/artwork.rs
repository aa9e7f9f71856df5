//! Artwork entity models, catalog filters, and pagination types.

use atelier_core::error::CoreError;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::asset::AssetWithVariants;

/// Artwork lifecycle status: implicit pre-commit state.
pub const STATUS_DRAFT: &str = "DRAFT";
/// Artwork lifecycle status: visible in the catalog. The generation
/// pipeline commits directly into this state; nothing in this layer ever
/// transitions back.
pub const STATUS_PUBLISHED: &str = "PUBLISHED";

/// Default category assigned to generated artworks.
pub const DEFAULT_CATEGORY: &str = "PORTRAIT";

// ---------------------------------------------------------------------------
// Artwork
// ---------------------------------------------------------------------------

/// A row from the `artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artwork {
    pub id: DbId,
    pub title: String,
    pub artist: String,
    pub style_key: String,
    pub status: String,
    pub price_cents: i64,
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new artwork.
///
/// `thumbnail_url` is provisional (the original image address); the
/// catalog writer repoints it at a medium-tier variant before commit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtwork {
    pub title: String,
    pub artist: String,
    pub style_key: String,
    pub price_cents: i64,
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub featured: bool,
}

/// An artwork enriched with its assets and their variants, for detail views.
#[derive(Debug, Serialize)]
pub struct ArtworkWithAssets {
    pub artwork: Artwork,
    pub assets: Vec<AssetWithVariants>,
}

// ---------------------------------------------------------------------------
// Catalog search
// ---------------------------------------------------------------------------

/// Optional filter predicates, AND-combined by [`ArtworkRepo::search`].
///
/// [`ArtworkRepo::search`]: crate::repositories::ArtworkRepo::search
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring match over title, artist, and tags.
    pub text: Option<String>,
    /// Exact style key, e.g. `VAN_GOGH`.
    pub style_key: Option<String>,
    /// Exact category, e.g. `PORTRAIT`.
    pub category: Option<String>,
    /// Tag membership.
    pub tag: Option<String>,
}

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSort {
    /// Most recently created first (the default).
    #[default]
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Featured rows first, newest within each group.
    Featured,
}

impl CatalogSort {
    /// Parse a user-supplied sort name (case-insensitive).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_lowercase().as_str() {
            "newest" | "" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "featured" => Ok(Self::Featured),
            other => Err(CoreError::Validation(format!(
                "Unknown sort '{other}'. Must be one of: newest, price-asc, price-desc, featured"
            ))),
        }
    }

    /// ORDER BY clause body. Every order ends with `id DESC` so identical
    /// queries over an unchanged dataset return identical row order.
    pub(crate) fn order_clause(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC, id DESC",
            Self::PriceAsc => "price_cents ASC, id DESC",
            Self::PriceDesc => "price_cents DESC, id DESC",
            Self::Featured => "featured DESC, created_at DESC, id DESC",
        }
    }
}

/// 1-indexed pagination request with a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Default page size for catalog listings.
    pub const DEFAULT_PER_PAGE: i64 = 24;
    /// Maximum page size for catalog listings.
    pub const MAX_PER_PAGE: i64 = 100;

    /// Build a request, clamping the page to >= 1 and the page size into
    /// `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Row offset for this page.
    pub fn offset(self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Number of pages needed for `total` rows.
    pub fn page_count(self, total: i64) -> i64 {
        if total == 0 {
            0
        } else {
            (total + self.per_page - 1) / self.per_page
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of catalog search results.
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub items: Vec<Artwork>,
    pub total: i64,
    pub page: i64,
    pub page_count: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
