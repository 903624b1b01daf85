//! Domain error types.
//!
//! `StoreError` is what storage backends report; `WorkflowError` is what
//! workflow commands report to their callers. Every `WorkflowError` belongs to
//! exactly one [`ErrorKind`].

use serde::Serialize;
use thiserror::Error;

/// The error kinds a workflow command can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Authorization,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Authorization => "authorization_error",
            ErrorKind::Storage => "storage_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by workflow commands.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl WorkflowError {
    /// Returns the kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Validation(_) => ErrorKind::Validation,
            WorkflowError::NotFound(_) => ErrorKind::NotFound,
            WorkflowError::Conflict(_) => ErrorKind::Conflict,
            WorkflowError::Unauthenticated | WorkflowError::Forbidden(_) => {
                ErrorKind::Authorization
            }
            WorkflowError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Message safe to show to a caller.
    ///
    /// Storage failures are replaced with a generic message; the detail stays in logs.
    pub fn public_message(&self) -> String {
        match self {
            WorkflowError::Validation(msg)
            | WorkflowError::NotFound(msg)
            | WorkflowError::Conflict(msg)
            | WorkflowError::Forbidden(msg) => msg.clone(),
            WorkflowError::Unauthenticated => "Authentication required".to_string(),
            WorkflowError::Storage(_) => "An internal error occurred".to_string(),
        }
    }
}

/// Errors reported by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Referenced record not found")]
    MissingReference,

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Backend(String),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingReference => {
                WorkflowError::NotFound("Referenced resource not found".into())
            }
            StoreError::Duplicate(_) => WorkflowError::Conflict("Resource already exists".into()),
            StoreError::Backend(msg) => WorkflowError::Storage(msg),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => StoreError::Duplicate(db_err.message().to_string()),
                Some("23503") => StoreError::MissingReference,
                _ => StoreError::Backend(db_err.to_string()),
            },
            other => StoreError::Backend(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for WorkflowError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();

        let message = if messages.len() == 1 {
            messages[0].clone()
        } else {
            format!("{} validation errors", messages.len())
        };

        WorkflowError::Validation(message)
    }
}

impl From<validator::ValidationError> for WorkflowError {
    fn from(error: validator::ValidationError) -> Self {
        WorkflowError::Validation(
            error
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string()),
        )
    }
}
