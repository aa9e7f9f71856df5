//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the catalog listing endpoint
/// (`?q=&style=&category=&tag=&sort=&page=&per_page=`).
///
/// `page`/`per_page` are clamped in the repository layer; `style` is a
/// slug resolved through the registry; `sort` is parsed by
/// `CatalogSort::parse`.
#[derive(Debug, Deserialize)]
pub struct ArtworkListParams {
    /// Free-text search over title, artist, and tags.
    pub q: Option<String>,
    /// Style slug filter, e.g. `van-gogh`.
    pub style: Option<String>,
    /// Category filter, e.g. `PORTRAIT`.
    pub category: Option<String>,
    /// Tag membership filter.
    pub tag: Option<String>,
    /// Sort: `newest`, `price-asc`, `price-desc`, or `featured`.
    pub sort: Option<String>,
    /// 1-indexed page.
    pub page: Option<i64>,
    /// Page size, clamped to the configured bounds.
    pub per_page: Option<i64>,
}

/// Query parameters for the new-drops strip (`?limit=`).
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}
