//! Handler for the generation endpoint.

use atelier_pipeline::{GenerationReceipt, GenerationRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/artworks/generate`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateBody {
    /// Artwork title, 1..=120 characters.
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    /// Style slug, e.g. `van-gogh`.
    pub style: String,
    /// Optional aspect: `square`, `portrait`, `landscape`, or `auto`.
    pub aspect: Option<String>,
}

/// POST /api/v1/artworks/generate
///
/// Runs the full generation pipeline inline and answers with the
/// committed artwork id and its stored addresses. Runs under the server
/// request timeout; the synthesis deadline keeps the pipeline inside it.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> AppResult<(StatusCode, Json<DataResponse<GenerationReceipt>>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let request = GenerationRequest {
        title: body.title,
        style_slug: body.style,
        aspect: body.aspect,
    };
    let receipt = state.pipeline.run(&request).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}
