//! Shared fixtures for repository tests against a real PostgreSQL database.
//!
//! Tests are skipped unless `TEST_DATABASE_URL` is set.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use domain::models::{Event, NewEvent, NewNewsPost, NewsPost};
use domain::services::{EventStore, NewsStore};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use persistence::db::{create_pool, DatabaseConfig};
use persistence::repositories::{EventRepository, NewsRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// Connects to `TEST_DATABASE_URL` and applies migrations.
///
/// Returns `None` when the variable is unset so the calling test can skip.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = create_pool(&DatabaseConfig {
        url,
        max_connections: 20,
        min_connections: 1,
        connect_timeout_secs: 30,
        idle_timeout_secs: 60,
    })
    .await
    .expect("Failed to connect to test database");

    sqlx::migrate!("./src/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

pub async fn insert_event(pool: &PgPool, capacity: i32) -> Event {
    let start_at = Utc::now() + Duration::days(3);
    EventRepository::new(pool.clone())
        .insert_event(NewEvent {
            club_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            title: Sentence(2..4).fake(),
            description: Some(Paragraph(1..2).fake()),
            event_type: Some("workshop".to_string()),
            location: Some("Library room 2".to_string()),
            start_at,
            end_at: start_at + Duration::hours(2),
            registration_deadline: None,
            capacity,
        })
        .await
        .expect("Failed to insert event")
}

pub async fn insert_news(pool: &PgPool) -> NewsPost {
    NewsRepository::new(pool.clone())
        .insert_news(NewNewsPost {
            club_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: Sentence(2..4).fake(),
            content: Paragraph(1..3).fake(),
            category: Some("announcements".to_string()),
            is_featured: false,
        })
        .await
        .expect("Failed to insert news post")
}
