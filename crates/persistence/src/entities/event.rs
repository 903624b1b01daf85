//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Event, EventStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for event_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
pub enum EventStatusDb {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl From<EventStatusDb> for EventStatus {
    fn from(db_status: EventStatusDb) -> Self {
        match db_status {
            EventStatusDb::Pending => EventStatus::Pending,
            EventStatusDb::Approved => EventStatus::Approved,
            EventStatusDb::Rejected => EventStatus::Rejected,
            EventStatusDb::Completed => EventStatus::Completed,
            EventStatusDb::Cancelled => EventStatus::Cancelled,
        }
    }
}

impl From<EventStatus> for EventStatusDb {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Pending => EventStatusDb::Pending,
            EventStatus::Approved => EventStatusDb::Approved,
            EventStatus::Rejected => EventStatusDb::Rejected,
            EventStatus::Completed => EventStatusDb::Completed,
            EventStatus::Cancelled => EventStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: i32,
    pub status: EventStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            created_by: entity.created_by,
            title: entity.title,
            description: entity.description,
            event_type: entity.event_type,
            location: entity.location,
            start_at: entity.start_at,
            end_at: entity.end_at,
            registration_deadline: entity.registration_deadline,
            capacity: entity.capacity,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
