//! In-app notification models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::activity_log::EntityType;

/// Kind of notification shown to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    RegistrationConfirmed,
    RegistrationWaitlisted,
    EventApproved,
    EventRejected,
    EventCancelled,
    NewsPublished,
    NewsRejected,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::RegistrationConfirmed => "registration_confirmed",
            NotificationType::RegistrationWaitlisted => "registration_waitlisted",
            NotificationType::EventApproved => "event_approved",
            NotificationType::EventRejected => "event_rejected",
            NotificationType::EventCancelled => "event_cancelled",
            NotificationType::NewsPublished => "news_published",
            NotificationType::NewsRejected => "news_rejected",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration_confirmed" => Ok(NotificationType::RegistrationConfirmed),
            "registration_waitlisted" => Ok(NotificationType::RegistrationWaitlisted),
            "event_approved" => Ok(NotificationType::EventApproved),
            "event_rejected" => Ok(NotificationType::EventRejected),
            "event_cancelled" => Ok(NotificationType::EventCancelled),
            "news_published" => Ok(NotificationType::NewsPublished),
            "news_rejected" => Ok(NotificationType::NewsRejected),
            _ => Err(format!("Unknown notification type: {}", s)),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub related_entity_type: Option<EntityType>,
    pub related_entity_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNotificationInput {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub related_entity_type: Option<EntityType>,
    pub related_entity_id: Option<Uuid>,
}

/// Response body for the unread counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_round_trip() {
        for t in [
            NotificationType::RegistrationConfirmed,
            NotificationType::RegistrationWaitlisted,
            NotificationType::EventApproved,
            NotificationType::EventRejected,
            NotificationType::EventCancelled,
            NotificationType::NewsPublished,
            NotificationType::NewsRejected,
        ] {
            assert_eq!(t.as_str().parse::<NotificationType>().unwrap(), t);
        }
        assert!("digest".parse::<NotificationType>().is_err());
    }
}
