//! Committed workflow transitions handed to post-commit hooks.

use uuid::Uuid;

use crate::models::{ActivityAction, Event, Feedback, NewsPost, Registration};

/// A state change that has already been committed.
#[derive(Debug, Clone)]
pub enum WorkflowTransition {
    EventCreated { actor: Uuid, event: Event },
    EventApproved { actor: Uuid, event: Event },
    EventRejected { actor: Uuid, event: Event },
    EventCompleted { actor: Uuid, event: Event },
    EventCancelled { actor: Uuid, event: Event },
    NewsCreated { actor: Uuid, post: NewsPost },
    NewsPublished { actor: Uuid, post: NewsPost },
    NewsRejected { actor: Uuid, post: NewsPost },
    Registered {
        actor: Uuid,
        event: Event,
        registration: Registration,
    },
    RegistrationCancelled {
        actor: Uuid,
        registration: Registration,
    },
    AttendanceMarked {
        actor: Uuid,
        registration: Registration,
    },
    FeedbackSubmitted { actor: Uuid, feedback: Feedback },
}

impl WorkflowTransition {
    /// User who issued the command.
    pub fn actor(&self) -> Uuid {
        match self {
            WorkflowTransition::EventCreated { actor, .. }
            | WorkflowTransition::EventApproved { actor, .. }
            | WorkflowTransition::EventRejected { actor, .. }
            | WorkflowTransition::EventCompleted { actor, .. }
            | WorkflowTransition::EventCancelled { actor, .. }
            | WorkflowTransition::NewsCreated { actor, .. }
            | WorkflowTransition::NewsPublished { actor, .. }
            | WorkflowTransition::NewsRejected { actor, .. }
            | WorkflowTransition::Registered { actor, .. }
            | WorkflowTransition::RegistrationCancelled { actor, .. }
            | WorkflowTransition::AttendanceMarked { actor, .. }
            | WorkflowTransition::FeedbackSubmitted { actor, .. } => *actor,
        }
    }

    pub fn action(&self) -> ActivityAction {
        match self {
            WorkflowTransition::EventCreated { .. } => ActivityAction::EventCreated,
            WorkflowTransition::EventApproved { .. } => ActivityAction::EventApproved,
            WorkflowTransition::EventRejected { .. } => ActivityAction::EventRejected,
            WorkflowTransition::EventCompleted { .. } => ActivityAction::EventCompleted,
            WorkflowTransition::EventCancelled { .. } => ActivityAction::EventCancelled,
            WorkflowTransition::NewsCreated { .. } => ActivityAction::NewsCreated,
            WorkflowTransition::NewsPublished { .. } => ActivityAction::NewsPublished,
            WorkflowTransition::NewsRejected { .. } => ActivityAction::NewsRejected,
            WorkflowTransition::Registered { .. } => ActivityAction::EventRegistered,
            WorkflowTransition::RegistrationCancelled { .. } => {
                ActivityAction::EventRegistrationCancelled
            }
            WorkflowTransition::AttendanceMarked { .. } => ActivityAction::AttendanceMarked,
            WorkflowTransition::FeedbackSubmitted { .. } => ActivityAction::FeedbackSubmitted,
        }
    }

    /// Id of the event or news post the transition refers to.
    pub fn entity_id(&self) -> Uuid {
        match self {
            WorkflowTransition::EventCreated { event, .. }
            | WorkflowTransition::EventApproved { event, .. }
            | WorkflowTransition::EventRejected { event, .. }
            | WorkflowTransition::EventCompleted { event, .. }
            | WorkflowTransition::EventCancelled { event, .. }
            | WorkflowTransition::Registered { event, .. } => event.id,
            WorkflowTransition::NewsCreated { post, .. }
            | WorkflowTransition::NewsPublished { post, .. }
            | WorkflowTransition::NewsRejected { post, .. } => post.id,
            WorkflowTransition::RegistrationCancelled { registration, .. }
            | WorkflowTransition::AttendanceMarked { registration, .. } => registration.event_id,
            WorkflowTransition::FeedbackSubmitted { feedback, .. } => feedback.event_id,
        }
    }
}
