//! Registration and feedback repository.
//!
//! `register` holds a row lock on the event for the whole capacity decision,
//! so concurrent registrations for one event are serialized by Postgres.

use async_trait::async_trait;
use domain::models::{Feedback, Registration, RegistrationCounts, RegistrationStatus};
use domain::services::{RegistrationStore, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    FeedbackEntity, RegistrationCountsEntity, RegistrationEntity, RegistrationStatusDb,
};
use crate::metrics::QueryTimer;

/// Repository for event registrations and feedback.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn register(&self, event_id: Uuid, user_id: Uuid) -> StoreResult<Option<Registration>> {
        let timer = QueryTimer::new("register_for_event");
        let mut tx = self.pool.begin().await?;

        let capacity: Option<i32> =
            sqlx::query_scalar("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

        let capacity = match capacity {
            Some(capacity) => capacity,
            None => {
                tx.rollback().await?;
                timer.record();
                return Ok(None);
            }
        };

        // The caller's own row is left out so re-registering keeps its seat.
        let confirmed_others: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM event_registrations
            WHERE event_id = $1 AND user_id <> $2 AND status = 'confirmed'
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let status = RegistrationStatus::decide(capacity, confirmed_others);

        let entity = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            INSERT INTO event_registrations (event_id, user_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            RETURNING id, event_id, user_id, status, attendance_marked, feedback_submitted,
                      registered_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(RegistrationStatusDb::from(status))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(entity.into()))
    }

    async fn cancel_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        let timer = QueryTimer::new("cancel_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE event_registrations
            SET status = 'cancelled', updated_at = NOW()
            WHERE event_id = $1 AND user_id = $2
            RETURNING id, event_id, user_id, status, attendance_marked, feedback_submitted,
                      registered_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    async fn mark_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        let timer = QueryTimer::new("mark_attendance");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE event_registrations
            SET attendance_marked = TRUE,
                updated_at = CASE WHEN attendance_marked THEN updated_at ELSE NOW() END
            WHERE event_id = $1 AND user_id = $2
            RETURNING id, event_id, user_id, status, attendance_marked, feedback_submitted,
                      registered_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    async fn upsert_feedback(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> StoreResult<Option<Feedback>> {
        let timer = QueryTimer::new("upsert_feedback");
        let mut tx = self.pool.begin().await?;

        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        }

        let feedback = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            INSERT INTO event_feedback (event_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET rating = EXCLUDED.rating, comment = EXCLUDED.comment, updated_at = NOW()
            RETURNING id, event_id, user_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(rating)
        .bind(&comment)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE event_registrations
            SET feedback_submitted = TRUE, updated_at = NOW()
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(feedback.into()))
    }

    async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        let timer = QueryTimer::new("find_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, user_id, status, attendance_marked, feedback_submitted,
                   registered_at, updated_at
            FROM event_registrations
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    async fn list_registrations(&self, event_id: Uuid) -> StoreResult<Vec<Registration>> {
        let timer = QueryTimer::new("list_registrations");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, user_id, status, attendance_marked, feedback_submitted,
                   registered_at, updated_at
            FROM event_registrations
            WHERE event_id = $1
            ORDER BY registered_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn registration_counts(&self, event_id: Uuid) -> StoreResult<RegistrationCounts> {
        let timer = QueryTimer::new("registration_counts");
        let result = sqlx::query_as::<_, RegistrationCountsEntity>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed,
                COUNT(*) FILTER (WHERE status = 'waitlist') AS waitlist
            FROM event_registrations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        let counts = result?;
        Ok(RegistrationCounts {
            confirmed: counts.confirmed,
            waitlist: counts.waitlist,
        })
    }
}
