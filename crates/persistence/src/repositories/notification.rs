//! Notification repository.

use async_trait::async_trait;
use domain::models::{CreateNotificationInput, Notification};
use domain::services::{NotificationStore, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, input: CreateNotificationInput) -> StoreResult<Notification> {
        let timer = QueryTimer::new("insert_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, title, message, notification_type,
                                       related_entity_type, related_entity_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, message, notification_type, related_entity_type,
                      related_entity_id, is_read, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.message)
        .bind(input.notification_type.as_str())
        .bind(input.related_entity_type.map(|t| t.as_str()))
        .bind(input.related_entity_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result?.try_into()
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Notification>> {
        let timer = QueryTimer::new("list_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, title, message, notification_type, related_entity_type,
                   related_entity_id, is_read, created_at
            FROM notifications
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
        result?.into_iter().map(TryInto::try_into).collect()
    }

    async fn unread_count(&self, user_id: Uuid) -> StoreResult<i64> {
        let timer = QueryTimer::new("count_unread_notifications");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("mark_notification_read");
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&self.pool)
                .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> StoreResult<u64> {
        let timer = QueryTimer::new("mark_all_notifications_read");
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("delete_notification");
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
