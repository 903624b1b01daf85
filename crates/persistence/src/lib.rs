//! Persistence layer for the clubs workflow backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Postgres implementations of the domain store traits

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

use std::sync::Arc;

use domain::services::WorkflowStores;
use sqlx::PgPool;

use repositories::{
    ActivityLogRepository, EventRepository, NewsRepository, NotificationRepository,
    RegistrationRepository,
};

/// Builds the Postgres-backed stores sharing one pool.
pub fn workflow_stores(pool: PgPool) -> WorkflowStores {
    WorkflowStores {
        events: Arc::new(EventRepository::new(pool.clone())),
        news: Arc::new(NewsRepository::new(pool.clone())),
        registrations: Arc::new(RegistrationRepository::new(pool.clone())),
        activity: Arc::new(ActivityLogRepository::new(pool.clone())),
        notifications: Arc::new(NotificationRepository::new(pool)),
    }
}
