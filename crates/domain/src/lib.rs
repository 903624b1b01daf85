//! Domain layer for the clubs workflow backend.
//!
//! This crate contains:
//! - Domain models (Event, NewsPost, Registration, Feedback, ActivityLogEntry, Notification)
//! - Domain error kinds
//! - Storage traits and an in-memory store
//! - The workflow engine: moderation, registration, side-effect pipeline, coordinator

pub mod error;
pub mod models;
pub mod services;

pub use error::{ErrorKind, StoreError, WorkflowError};
