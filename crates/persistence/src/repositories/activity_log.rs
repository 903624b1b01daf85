//! Activity log repository.

use async_trait::async_trait;
use domain::models::{ActivityLogEntry, CreateActivityLogInput};
use domain::services::{ActivityLogStore, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ActivityLogEntity;
use crate::metrics::QueryTimer;

/// Append-only store for activity log entries.
#[derive(Clone)]
pub struct ActivityLogRepository {
    pool: PgPool,
}

impl ActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_entries(entities: Vec<ActivityLogEntity>) -> StoreResult<Vec<ActivityLogEntry>> {
    entities.into_iter().map(TryInto::try_into).collect()
}

#[async_trait]
impl ActivityLogStore for ActivityLogRepository {
    async fn append(&self, input: CreateActivityLogInput) -> StoreResult<ActivityLogEntry> {
        let timer = QueryTimer::new("insert_activity_log");
        let result = sqlx::query_as::<_, ActivityLogEntity>(
            r#"
            INSERT INTO activity_logs (user_id, action, entity_type, entity_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, action, entity_type, entity_id, details, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.action.as_str())
        .bind(input.entity_type.as_str())
        .bind(input.entity_id)
        .bind(&input.details)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result?.try_into()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ActivityLogEntry>> {
        let timer = QueryTimer::new("list_activity_for_user");
        let result = sqlx::query_as::<_, ActivityLogEntity>(
            r#"
            SELECT id, user_id, action, entity_type, entity_id, details, created_at
            FROM activity_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        into_entries(result?)
    }

    async fn list_all(&self, limit: i64) -> StoreResult<Vec<ActivityLogEntry>> {
        let timer = QueryTimer::new("list_activity");
        let result = sqlx::query_as::<_, ActivityLogEntity>(
            r#"
            SELECT id, user_id, action, entity_type, entity_id, details, created_at
            FROM activity_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        into_entries(result?)
    }
}
