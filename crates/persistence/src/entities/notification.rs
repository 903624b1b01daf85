//! Notification entity.

use chrono::{DateTime, Utc};
use domain::models::{EntityType, Notification, NotificationType};
use domain::StoreError;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationEntity> for Notification {
    type Error = StoreError;

    fn try_from(entity: NotificationEntity) -> Result<Self, Self::Error> {
        let related_entity_type = entity
            .related_entity_type
            .map(|t| t.parse::<EntityType>())
            .transpose()
            .map_err(StoreError::Backend)?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            message: entity.message,
            notification_type: entity
                .notification_type
                .parse::<NotificationType>()
                .map_err(StoreError::Backend)?,
            related_entity_type,
            related_entity_id: entity.related_entity_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        })
    }
}
