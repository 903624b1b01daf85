//! JSON body extractor whose rejections use the service error body.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// Like [`axum::Json`], but malformed bodies become `validation_error` responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
