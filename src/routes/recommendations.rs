use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
};

/// Handler for the recommendation endpoint
///
/// The user id is validated here, before the pipeline touches the store.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let (user_id, k) = request.into_parts()?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        k = ?k,
        "Processing recommendation request"
    );

    let response = state.recommender.generate_recommendations(user_id, k).await?;

    tracing::info!(
        request_id = %request_id,
        returned = response.recommendations.len(),
        empty_reason = response.message.as_deref().unwrap_or(""),
        "Recommendation request completed"
    );

    Ok(Json(response))
}
