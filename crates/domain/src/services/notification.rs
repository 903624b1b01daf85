//! Notification templates for workflow transitions.
//!
//! Decides who hears about a transition and what they are told. Delivery is
//! done by the notification hook.

use uuid::Uuid;

use super::transition::WorkflowTransition;
use crate::models::{
    CreateNotificationInput, EntityType, Event, NewsPost, NotificationType, Registration,
    RegistrationStatus,
};

fn event_notice(
    user_id: Uuid,
    event: &Event,
    notification_type: NotificationType,
    title: &str,
    message: String,
) -> CreateNotificationInput {
    CreateNotificationInput {
        user_id,
        title: title.to_string(),
        message,
        notification_type,
        related_entity_type: Some(EntityType::Event),
        related_entity_id: Some(event.id),
    }
}

fn news_notice(
    post: &NewsPost,
    notification_type: NotificationType,
    title: &str,
    message: String,
) -> CreateNotificationInput {
    CreateNotificationInput {
        user_id: post.author_id,
        title: title.to_string(),
        message,
        notification_type,
        related_entity_type: Some(EntityType::News),
        related_entity_id: Some(post.id),
    }
}

/// Notice sent to a registrant after registering.
pub fn registration_notice(event: &Event, registration: &Registration) -> CreateNotificationInput {
    match registration.status {
        RegistrationStatus::Waitlist => event_notice(
            registration.user_id,
            event,
            NotificationType::RegistrationWaitlisted,
            "Added to waitlist",
            format!("\"{}\" is full. You have been added to the waitlist.", event.title),
        ),
        _ => event_notice(
            registration.user_id,
            event,
            NotificationType::RegistrationConfirmed,
            "Registration confirmed",
            format!("Your place at \"{}\" is confirmed.", event.title),
        ),
    }
}

/// Returns true if the transition notifies the event's registrants, which the
/// caller must then look up.
pub fn needs_registrants(transition: &WorkflowTransition) -> bool {
    matches!(transition, WorkflowTransition::EventCancelled { .. })
}

/// Notifications produced by a committed transition.
///
/// `registrants` is only consulted for transitions where [`needs_registrants`]
/// is true; cancelled registrations are skipped.
pub fn notifications_for(
    transition: &WorkflowTransition,
    registrants: &[Registration],
) -> Vec<CreateNotificationInput> {
    match transition {
        WorkflowTransition::Registered {
            event,
            registration,
            ..
        } => vec![registration_notice(event, registration)],
        WorkflowTransition::EventApproved { event, .. } => vec![event_notice(
            event.created_by,
            event,
            NotificationType::EventApproved,
            "Event approved",
            format!("Your event \"{}\" has been approved.", event.title),
        )],
        WorkflowTransition::EventRejected { event, .. } => vec![event_notice(
            event.created_by,
            event,
            NotificationType::EventRejected,
            "Event rejected",
            format!("Your event \"{}\" was not approved.", event.title),
        )],
        WorkflowTransition::EventCancelled { event, .. } => registrants
            .iter()
            .filter(|r| r.event_id == event.id && r.status.is_active())
            .map(|r| {
                event_notice(
                    r.user_id,
                    event,
                    NotificationType::EventCancelled,
                    "Event cancelled",
                    format!("\"{}\" has been cancelled.", event.title),
                )
            })
            .collect(),
        WorkflowTransition::NewsPublished { post, .. } => vec![news_notice(
            post,
            NotificationType::NewsPublished,
            "News published",
            format!("Your post \"{}\" is now published.", post.title),
        )],
        WorkflowTransition::NewsRejected { post, .. } => vec![news_notice(
            post,
            NotificationType::NewsRejected,
            "News rejected",
            format!("Your post \"{}\" was not approved.", post.title),
        )],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use chrono::{Duration, Utc};

    fn event() -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            club_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            title: "Hack night".to_string(),
            description: None,
            event_type: None,
            location: None,
            start_at: now,
            end_at: now + Duration::hours(4),
            registration_deadline: None,
            capacity: 10,
            status: EventStatus::Cancelled,
            created_at: now,
            updated_at: now,
        }
    }

    fn registration(event_id: Uuid, status: RegistrationStatus) -> Registration {
        let now = Utc::now();
        Registration {
            id: Uuid::new_v4(),
            event_id,
            user_id: Uuid::new_v4(),
            status,
            attendance_marked: false,
            feedback_submitted: false,
            registered_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_registration_notice_by_status() {
        let event = event();
        let confirmed = registration(event.id, RegistrationStatus::Confirmed);
        let waitlisted = registration(event.id, RegistrationStatus::Waitlist);

        let notice = registration_notice(&event, &confirmed);
        assert_eq!(notice.notification_type, NotificationType::RegistrationConfirmed);
        assert_eq!(notice.user_id, confirmed.user_id);

        let notice = registration_notice(&event, &waitlisted);
        assert_eq!(notice.notification_type, NotificationType::RegistrationWaitlisted);
        assert!(notice.message.contains("waitlist"));
    }

    #[test]
    fn test_cancellation_skips_cancelled_registrants() {
        let event = event();
        let registrants = vec![
            registration(event.id, RegistrationStatus::Confirmed),
            registration(event.id, RegistrationStatus::Waitlist),
            registration(event.id, RegistrationStatus::Cancelled),
        ];
        let transition = WorkflowTransition::EventCancelled {
            actor: Uuid::new_v4(),
            event: event.clone(),
        };

        assert!(needs_registrants(&transition));
        let notices = notifications_for(&transition, &registrants);
        assert_eq!(notices.len(), 2);
        assert!(notices
            .iter()
            .all(|n| n.notification_type == NotificationType::EventCancelled));
    }

    #[test]
    fn test_approval_notifies_creator() {
        let event = event();
        let transition = WorkflowTransition::EventApproved {
            actor: Uuid::new_v4(),
            event: event.clone(),
        };

        let notices = notifications_for(&transition, &[]);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].user_id, event.created_by);
        assert_eq!(notices[0].related_entity_id, Some(event.id));
    }

    #[test]
    fn test_silent_transitions() {
        let event = event();
        let transition = WorkflowTransition::EventCreated {
            actor: event.created_by,
            event,
        };
        assert!(!needs_registrants(&transition));
        assert!(notifications_for(&transition, &[]).is_empty());
    }
}
