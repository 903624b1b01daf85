//! News post endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateNewsRequest, NewsPost};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, Identity};

/// POST /api/v1/news
pub async fn create_news(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    AppJson(request): AppJson<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsPost>), ApiError> {
    let post = state.coordinator.create_news(&ctx, request).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Publish a pending post.
///
/// PUT /api/v1/news/:post_id/approve
pub async fn approve_news(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(post_id): Path<Uuid>,
) -> Result<Json<NewsPost>, ApiError> {
    Ok(Json(state.coordinator.approve_news(&ctx, post_id).await?))
}

/// PUT /api/v1/news/:post_id/reject
pub async fn reject_news(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(post_id): Path<Uuid>,
) -> Result<Json<NewsPost>, ApiError> {
    Ok(Json(state.coordinator.reject_news(&ctx, post_id).await?))
}
