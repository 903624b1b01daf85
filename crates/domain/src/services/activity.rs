//! Activity log entry construction.
//!
//! Builds `CreateActivityLogInput` values for committed transitions. Entries
//! are written by the activity hook after the command has committed.

use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use super::transition::WorkflowTransition;
use crate::models::{ActivityAction, CreateActivityLogInput};

/// Builder for activity log entries with a fluent API.
#[derive(Debug, Clone)]
pub struct ActivityLogBuilder {
    user_id: Uuid,
    action: ActivityAction,
    entity_id: Uuid,
    details: Map<String, JsonValue>,
}

impl ActivityLogBuilder {
    /// Create a builder for an action performed by `user_id`.
    pub fn user_action(user_id: Uuid, action: ActivityAction) -> Self {
        Self {
            user_id,
            action,
            entity_id: Uuid::nil(),
            details: Map::new(),
        }
    }

    /// Set the entity being acted upon. The entity type follows from the action.
    pub fn on_entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = entity_id;
        self
    }

    /// Add a single detail field.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> CreateActivityLogInput {
        let input = CreateActivityLogInput::new(self.user_id, self.action, self.entity_id);
        if self.details.is_empty() {
            input
        } else {
            input.with_details(JsonValue::Object(self.details))
        }
    }
}

/// Convenience functions for the entries each transition produces.
pub mod activity_helpers {
    use super::*;

    /// Entry recorded for a committed transition.
    pub fn for_transition(transition: &WorkflowTransition) -> CreateActivityLogInput {
        let builder = ActivityLogBuilder::user_action(transition.actor(), transition.action())
            .on_entity(transition.entity_id());

        match transition {
            WorkflowTransition::EventCreated { event, .. } => builder
                .with_detail("title", event.title.clone())
                .with_detail("capacity", event.capacity)
                .build(),
            WorkflowTransition::EventApproved { event, .. }
            | WorkflowTransition::EventRejected { event, .. }
            | WorkflowTransition::EventCompleted { event, .. }
            | WorkflowTransition::EventCancelled { event, .. } => builder
                .with_detail("title", event.title.clone())
                .with_detail("status", event.status.as_str())
                .build(),
            WorkflowTransition::NewsCreated { post, .. }
            | WorkflowTransition::NewsPublished { post, .. }
            | WorkflowTransition::NewsRejected { post, .. } => builder
                .with_detail("title", post.title.clone())
                .with_detail("status", post.status.as_str())
                .build(),
            WorkflowTransition::Registered { registration, .. } => builder
                .with_detail("registration_status", registration.status.as_str())
                .build(),
            WorkflowTransition::RegistrationCancelled { .. } => builder.build(),
            WorkflowTransition::AttendanceMarked { registration, .. } => builder
                .with_detail("attendee_id", registration.user_id.to_string())
                .build(),
            WorkflowTransition::FeedbackSubmitted { feedback, .. } => builder
                .with_detail("rating", feedback.rating)
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityType, Feedback};
    use chrono::Utc;

    #[test]
    fn test_builder_without_details() {
        let user_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();

        let input = ActivityLogBuilder::user_action(
            user_id,
            ActivityAction::EventRegistrationCancelled,
        )
        .on_entity(event_id)
        .build();

        assert_eq!(input.user_id, user_id);
        assert_eq!(input.entity_id, event_id);
        assert_eq!(input.entity_type, EntityType::Event);
        assert!(input.details.is_none());
    }

    #[test]
    fn test_builder_with_details() {
        let input = ActivityLogBuilder::user_action(Uuid::new_v4(), ActivityAction::NewsCreated)
            .on_entity(Uuid::new_v4())
            .with_detail("title", "Club fair")
            .with_detail("featured", true)
            .build();

        let details = input.details.unwrap();
        assert_eq!(details["title"], "Club fair");
        assert_eq!(details["featured"], true);
        assert_eq!(input.entity_type, EntityType::News);
    }

    #[test]
    fn test_feedback_transition_records_rating() {
        let actor = Uuid::new_v4();
        let feedback = Feedback {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: actor,
            rating: 4,
            comment: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let event_id = feedback.event_id;

        let input = activity_helpers::for_transition(&WorkflowTransition::FeedbackSubmitted {
            actor,
            feedback,
        });

        assert_eq!(input.action, ActivityAction::FeedbackSubmitted);
        assert_eq!(input.entity_id, event_id);
        assert_eq!(input.details.unwrap()["rating"], 4);
    }
}
