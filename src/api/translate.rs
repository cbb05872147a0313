//! Translation endpoint

use axum::extract::State;
use tracing::debug;

use super::state::AppState;
use super::types::{ApiError, Json, TranslateResponse};
use crate::domain::translation::TranslationRequest;

/// POST /translate
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let outcome = state.translation_service.translate(&request).await?;

    debug!(
        hits = outcome.cache_hits,
        misses = outcome.cache_misses,
        "Served translation"
    );

    Ok(Json(TranslateResponse::new(outcome.translation)))
}
