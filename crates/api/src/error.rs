use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{ErrorKind, WorkflowError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorKind::Authorization, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorKind::Authorization, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorKind::NotFound, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorKind::Conflict, msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorKind::Validation, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorKind::Storage,
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: kind.as_str().into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let message = err.public_message();
        match err {
            WorkflowError::Validation(_) => ApiError::Validation(message),
            WorkflowError::NotFound(_) => ApiError::NotFound(message),
            WorkflowError::Conflict(_) => ApiError::Conflict(message),
            WorkflowError::Unauthenticated => ApiError::Unauthorized(message),
            WorkflowError::Forbidden(_) => ApiError::Forbidden(message),
            WorkflowError::Storage(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_body_carries_kind_and_message() {
        let response = ApiError::from(WorkflowError::Conflict("Event is approved".into()))
            .into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "Event is approved");
    }

    #[tokio::test]
    async fn test_storage_detail_is_hidden() {
        let response = ApiError::from(WorkflowError::Storage(
            "connection refused on 10.0.0.5".into(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "storage_error");
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_authorization_errors_share_kind() {
        let unauthenticated = ApiError::from(WorkflowError::Unauthenticated).into_response();
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(unauthenticated).await["error"], "authorization_error");

        let forbidden =
            ApiError::from(WorkflowError::Forbidden("approve_event".into())).into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(forbidden).await["error"], "authorization_error");
    }
}
