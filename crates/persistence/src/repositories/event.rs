//! Event repository for database operations.

use async_trait::async_trait;
use domain::models::{Event, EventStatus, NewEvent};
use domain::services::{EventStore, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventEntity, EventStatusDb};
use crate::metrics::QueryTimer;

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn insert_event(&self, input: NewEvent) -> StoreResult<Event> {
        let timer = QueryTimer::new("insert_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (club_id, created_by, title, description, event_type, location,
                                start_at, end_at, registration_deadline, capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, club_id, created_by, title, description, event_type, location,
                      start_at, end_at, registration_deadline, capacity, status, created_at, updated_at
            "#,
        )
        .bind(input.club_id)
        .bind(input.created_by)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.event_type)
        .bind(&input.location)
        .bind(input.start_at)
        .bind(input.end_at)
        .bind(input.registration_deadline)
        .bind(input.capacity)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, club_id, created_by, title, description, event_type, location,
                   start_at, end_at, registration_deadline, capacity, status, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    async fn transition_event(
        &self,
        id: Uuid,
        from: &[EventStatus],
        to: EventStatus,
    ) -> StoreResult<Option<Event>> {
        let from: Vec<&'static str> = from.iter().map(|s| s.as_str()).collect();

        let timer = QueryTimer::new("transition_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status::text = ANY($2)
            RETURNING id, club_id, created_by, title, description, event_type, location,
                      start_at, end_at, registration_deadline, capacity, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&from)
        .bind(EventStatusDb::from(to))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }
}
