//! Activity log entity.

use chrono::{DateTime, Utc};
use domain::models::{ActivityAction, ActivityLogEntry, EntityType};
use domain::StoreError;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for activity log entries.
///
/// `action` and `entity_type` are stored as text tags.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ActivityLogEntity> for ActivityLogEntry {
    type Error = StoreError;

    fn try_from(entity: ActivityLogEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            action: entity
                .action
                .parse::<ActivityAction>()
                .map_err(StoreError::Backend)?,
            entity_type: entity
                .entity_type
                .parse::<EntityType>()
                .map_err(StoreError::Backend)?,
            entity_id: entity.entity_id,
            details: entity.details,
            created_at: entity.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(action: &str) -> ActivityLogEntity {
        ActivityLogEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            action: action.to_string(),
            entity_type: "event".to_string(),
            entity_id: Uuid::new_v4(),
            details: Some(serde_json::json!({"registration_status": "waitlist"})),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entry = ActivityLogEntry::try_from(entity("event_registered")).unwrap();
        assert_eq!(entry.action, ActivityAction::EventRegistered);
        assert_eq!(entry.entity_type, EntityType::Event);
    }

    #[test]
    fn test_unknown_action_is_backend_error() {
        let result = ActivityLogEntry::try_from(entity("event_deleted"));
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }
}
