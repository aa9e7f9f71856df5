//! Route tree construction.

pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /styles                    GET   style registry listing
/// /artworks                  GET   catalog search
/// /artworks/recent           GET   new-drops strip
/// /artworks/generate         POST  run the generation pipeline
/// /artworks/{id}             GET   artwork detail with assets/variants
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/styles", get(handlers::styles::list))
        .route("/artworks", get(handlers::artworks::list))
        .route("/artworks/recent", get(handlers::artworks::recent))
        .route("/artworks/generate", post(handlers::generate::generate))
        .route("/artworks/{id}", get(handlers::artworks::get_by_id))
}
