//! Activity log queries.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::ActivityLogEntry;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;

/// GET /api/v1/activity/me
pub async fn my_activity(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<ActivityLogEntry>>, ApiError> {
    Ok(Json(state.coordinator.my_activity(&ctx).await?))
}

/// Another user's activity. Administrators only, unless it is the caller's own.
///
/// GET /api/v1/activity/users/:user_id
pub async fn user_activity(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ActivityLogEntry>>, ApiError> {
    Ok(Json(state.coordinator.user_activity(&ctx, user_id).await?))
}

/// GET /api/v1/activity
pub async fn all_activity(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<ActivityLogEntry>>, ApiError> {
    Ok(Json(state.coordinator.all_activity(&ctx).await?))
}
