//! Handlers for the `/artworks` catalog resource.

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::artwork::{
    Artwork, ArtworkWithAssets, CatalogFilter, CatalogPage, CatalogSort, PageRequest,
};
use atelier_db::repositories::ArtworkRepo;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::query::{ArtworkListParams, RecentParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum size of the new-drops strip.
const RECENT_DEFAULT: i64 = 24;
const RECENT_MAX: i64 = 48;

/// GET /api/v1/artworks
///
/// Catalog search: optional free text, style slug, category, and tag
/// filters; sort; 1-indexed pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ArtworkListParams>,
) -> AppResult<Json<DataResponse<CatalogPage>>> {
    // Resolve the slug up front so an unknown style is a 404, not an
    // empty listing.
    let style_key = match params.style.as_deref() {
        Some(slug) => Some(state.registry.resolve(slug)?.key.to_string()),
        None => None,
    };
    let sort = match params.sort.as_deref() {
        Some(raw) => CatalogSort::parse(raw)?,
        None => CatalogSort::default(),
    };

    let filter = CatalogFilter {
        text: params.q,
        style_key,
        category: params.category,
        tag: params.tag,
    };
    let page = PageRequest::new(params.page, params.per_page);

    let result = ArtworkRepo::search(&state.pool, &filter, sort, page).await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/artworks/recent
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<DataResponse<Vec<Artwork>>>> {
    let limit = params.limit.unwrap_or(RECENT_DEFAULT).clamp(1, RECENT_MAX);
    let items = ArtworkRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/artworks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ArtworkWithAssets>>> {
    let detail = ArtworkRepo::find_with_assets(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}
