//! Activity log domain models.
//!
//! Entries are append-only and never modified once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of entity an activity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Event,
    News,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Event => "event",
            EntityType::News => "news",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "event" => Ok(EntityType::Event),
            "news" => Ok(EntityType::News),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded workflow actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    // Event lifecycle
    EventCreated,
    EventApproved,
    EventRejected,
    EventCompleted,
    EventCancelled,

    // Registration
    EventRegistered,
    EventRegistrationCancelled,
    AttendanceMarked,
    FeedbackSubmitted,

    // News
    NewsCreated,
    NewsPublished,
    NewsRejected,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::EventCreated => "event_created",
            ActivityAction::EventApproved => "event_approved",
            ActivityAction::EventRejected => "event_rejected",
            ActivityAction::EventCompleted => "event_completed",
            ActivityAction::EventCancelled => "event_cancelled",
            ActivityAction::EventRegistered => "event_registered",
            ActivityAction::EventRegistrationCancelled => "event_registration_cancelled",
            ActivityAction::AttendanceMarked => "attendance_marked",
            ActivityAction::FeedbackSubmitted => "feedback_submitted",
            ActivityAction::NewsCreated => "news_created",
            ActivityAction::NewsPublished => "news_published",
            ActivityAction::NewsRejected => "news_rejected",
        }
    }

    /// Entity type this action refers to.
    pub fn entity_type(&self) -> EntityType {
        match self {
            ActivityAction::NewsCreated
            | ActivityAction::NewsPublished
            | ActivityAction::NewsRejected => EntityType::News,
            _ => EntityType::Event,
        }
    }
}

impl FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event_created" => Ok(ActivityAction::EventCreated),
            "event_approved" => Ok(ActivityAction::EventApproved),
            "event_rejected" => Ok(ActivityAction::EventRejected),
            "event_completed" => Ok(ActivityAction::EventCompleted),
            "event_cancelled" => Ok(ActivityAction::EventCancelled),
            "event_registered" => Ok(ActivityAction::EventRegistered),
            "event_registration_cancelled" => Ok(ActivityAction::EventRegistrationCancelled),
            "attendance_marked" => Ok(ActivityAction::AttendanceMarked),
            "feedback_submitted" => Ok(ActivityAction::FeedbackSubmitted),
            "news_created" => Ok(ActivityAction::NewsCreated),
            "news_published" => Ok(ActivityAction::NewsPublished),
            "news_rejected" => Ok(ActivityAction::NewsRejected),
            _ => Err(format!("Unknown activity action: {}", s)),
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub details: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending an activity log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateActivityLogInput {
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub details: Option<JsonValue>,
}

impl CreateActivityLogInput {
    pub fn new(user_id: Uuid, action: ActivityAction, entity_id: Uuid) -> Self {
        Self {
            user_id,
            action,
            entity_type: action.entity_type(),
            entity_id,
            details: None,
        }
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trip() {
        let actions = [
            ActivityAction::EventCreated,
            ActivityAction::EventApproved,
            ActivityAction::EventRejected,
            ActivityAction::EventCompleted,
            ActivityAction::EventCancelled,
            ActivityAction::EventRegistered,
            ActivityAction::EventRegistrationCancelled,
            ActivityAction::AttendanceMarked,
            ActivityAction::FeedbackSubmitted,
            ActivityAction::NewsCreated,
            ActivityAction::NewsPublished,
            ActivityAction::NewsRejected,
        ];
        for action in actions {
            assert_eq!(action.as_str().parse::<ActivityAction>().unwrap(), action);
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn test_action_entity_type() {
        assert_eq!(ActivityAction::NewsPublished.entity_type(), EntityType::News);
        assert_eq!(ActivityAction::FeedbackSubmitted.entity_type(), EntityType::Event);
    }

    #[test]
    fn test_input_builder() {
        let user_id = Uuid::new_v4();
        let entity_id = Uuid::new_v4();
        let input = CreateActivityLogInput::new(user_id, ActivityAction::NewsCreated, entity_id)
            .with_details(serde_json::json!({"title": "Welcome week"}));

        assert_eq!(input.entity_type, EntityType::News);
        assert_eq!(input.details.unwrap()["title"], "Welcome week");
    }
}
