//! Handler for the style registry listing.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// One registry entry as exposed to presentation layers.
#[derive(Debug, Serialize)]
pub struct StyleEntry {
    pub key: &'static str,
    pub slug: &'static str,
    pub label: &'static str,
}

/// GET /api/v1/styles -- all styles in presentation order.
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<StyleEntry>>> {
    let styles = state
        .registry
        .ordered()
        .map(|s| StyleEntry {
            key: s.key,
            slug: s.slug,
            label: s.label,
        })
        .collect();
    Json(DataResponse { data: styles })
}
