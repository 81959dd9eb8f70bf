use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Gallery, Recommendations},
    routes::{AppState, JsonBody},
    services::gallery::build_gallery,
};

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    /// Free-text mood, passed to the model unvalidated
    #[serde(default)]
    pub mood: String,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(request): JsonBody<MoodRequest>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(request_id = %request_id, mood = %request.mood, "Recommendations requested");

    let recommendations = state.recommender.recommend(&request.mood).await?;
    Ok(Json(recommendations))
}

/// Handler for the gallery endpoint: same pipeline, rendered as columns
pub async fn gallery(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(request): JsonBody<MoodRequest>,
) -> AppResult<Json<Gallery>> {
    tracing::info!(request_id = %request_id, mood = %request.mood, "Gallery requested");

    let recommendations = state.recommender.recommend(&request.mood).await?;
    Ok(Json(build_gallery(&recommendations)))
}
