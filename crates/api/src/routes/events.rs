//! Event endpoint handlers: creation, moderation, registration and feedback.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateEventRequest, Event, EventDetails, Feedback, Registration, SubmitFeedbackRequest,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, Identity};

/// Body for marking a registrant as attended.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub user_id: Uuid,
}

/// Create a new event in `pending` status.
///
/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    AppJson(request): AppJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = state.coordinator.create_event(&ctx, request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Event with its confirmed and waitlist counts.
///
/// GET /api/v1/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventDetails>, ApiError> {
    Ok(Json(state.coordinator.event_details(&ctx, event_id).await?))
}

/// POST /api/v1/events/:event_id/approve
pub async fn approve_event(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.coordinator.approve_event(&ctx, event_id).await?))
}

/// POST /api/v1/events/:event_id/reject
pub async fn reject_event(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.coordinator.reject_event(&ctx, event_id).await?))
}

/// POST /api/v1/events/:event_id/complete
pub async fn complete_event(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.coordinator.complete_event(&ctx, event_id).await?))
}

/// POST /api/v1/events/:event_id/cancel
pub async fn cancel_event(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.coordinator.cancel_event(&ctx, event_id).await?))
}

/// Register the caller, confirmed or waitlisted depending on capacity.
///
/// POST /api/v1/events/:event_id/register
pub async fn register(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let registration = state.coordinator.register_for_event(&ctx, event_id).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// DELETE /api/v1/events/:event_id/register
pub async fn cancel_registration(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    Ok(Json(
        state.coordinator.cancel_registration(&ctx, event_id).await?,
    ))
}

/// POST /api/v1/events/:event_id/attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
    AppJson(request): AppJson<MarkAttendanceRequest>,
) -> Result<Json<Registration>, ApiError> {
    Ok(Json(
        state
            .coordinator
            .mark_attendance(&ctx, event_id, request.user_id)
            .await?,
    ))
}

/// Create or replace the caller's feedback for the event.
///
/// POST /api/v1/events/:event_id/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(event_id): Path<Uuid>,
    AppJson(request): AppJson<SubmitFeedbackRequest>,
) -> Result<Json<Feedback>, ApiError> {
    Ok(Json(
        state
            .coordinator
            .submit_feedback(&ctx, event_id, request)
            .await?,
    ))
}
