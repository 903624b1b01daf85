//! Notification endpoint handlers. Every operation is scoped to the caller.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Notification, UnreadCount};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Notification>>, ApiError> {
    Ok(Json(state.coordinator.list_notifications(&ctx).await?))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<UnreadCount>, ApiError> {
    let count = state.coordinator.unread_notification_count(&ctx).await?;
    Ok(Json(UnreadCount { count }))
}

/// POST /api/v1/notifications/:notification_id/read
pub async fn mark_read(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .coordinator
        .mark_notification_read(&ctx, notification_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<MarkAllReadResponse>, ApiError> {
    let updated = state.coordinator.mark_all_notifications_read(&ctx).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

/// DELETE /api/v1/notifications/:notification_id
pub async fn delete_notification(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .coordinator
        .delete_notification(&ctx, notification_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
