//! Workflow coordinator.
//!
//! Single entry point for every workflow command. Each command checks the
//! caller's capability, performs its mutation through the engines, and only
//! after the mutation has committed hands the transition to the side-effect
//! pipeline. Side-effect failures never change a command's result.

use metrics::counter;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::moderation::ModerationEngine;
use super::pipeline::{DispatchMode, SideEffectPipeline};
use super::registration::RegistrationEngine;
use super::store::WorkflowStores;
use super::transition::WorkflowTransition;
use crate::error::WorkflowError;
use crate::models::{
    ActivityLogEntry, Command, CreateEventRequest, CreateNewsRequest, Event, EventDetails,
    EventStatus, Feedback, NewEvent, NewNewsPost, NewsPost, NewsStatus, Notification,
    Registration, RequestContext, SubmitFeedbackRequest,
};
use shared::validation::{validate_capacity, validate_event_window, validate_not_blank};

/// Default number of activity entries returned for a single user.
pub const DEFAULT_USER_ACTIVITY_LIMIT: i64 = 100;

/// Default number of activity entries returned for the global feed.
pub const DEFAULT_GLOBAL_ACTIVITY_LIMIT: i64 = 500;

/// Default number of notifications returned per listing.
pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;

/// Tunables for the coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub side_effects: DispatchMode,
    pub user_activity_limit: i64,
    pub global_activity_limit: i64,
    pub notification_limit: i64,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            side_effects: DispatchMode::Background,
            user_activity_limit: DEFAULT_USER_ACTIVITY_LIMIT,
            global_activity_limit: DEFAULT_GLOBAL_ACTIVITY_LIMIT,
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
        }
    }
}

pub struct WorkflowCoordinator {
    stores: WorkflowStores,
    moderation: ModerationEngine,
    registration: RegistrationEngine,
    pipeline: SideEffectPipeline,
    settings: CoordinatorSettings,
}

impl WorkflowCoordinator {
    /// Builds a coordinator with the standard activity and notification hooks.
    pub fn new(stores: WorkflowStores, settings: CoordinatorSettings) -> Self {
        let pipeline = SideEffectPipeline::standard(&stores, settings.side_effects);
        Self::with_pipeline(stores, pipeline, settings)
    }

    pub fn with_pipeline(
        stores: WorkflowStores,
        pipeline: SideEffectPipeline,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            moderation: ModerationEngine::new(stores.events.clone(), stores.news.clone()),
            registration: RegistrationEngine::new(stores.registrations.clone()),
            stores,
            pipeline,
            settings,
        }
    }

    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    async fn committed(&self, transition: WorkflowTransition) {
        let action = transition.action();
        counter!("workflow_transitions_total", "action" => action.as_str()).increment(1);
        info!(
            action = %action,
            actor = %transition.actor(),
            entity_id = %transition.entity_id(),
            "Workflow transition committed"
        );
        self.pipeline.dispatch(transition).await;
    }

    // Events

    pub async fn create_event(
        &self,
        ctx: &RequestContext,
        request: CreateEventRequest,
    ) -> Result<Event, WorkflowError> {
        let actor = ctx.require(Command::CreateEvent)?;
        request.validate()?;
        validate_not_blank(&request.title)?;
        validate_capacity(request.capacity)?;
        validate_event_window(request.start_at, request.end_at)?;

        let event = self
            .stores
            .events
            .insert_event(NewEvent::from_request(request, actor.user_id))
            .await?;

        self.committed(WorkflowTransition::EventCreated {
            actor: actor.user_id,
            event: event.clone(),
        })
        .await;
        Ok(event)
    }

    pub async fn event_details(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<EventDetails, WorkflowError> {
        ctx.require(Command::ViewEvent)?;
        let event = self
            .stores
            .events
            .find_event(event_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Event not found".into()))?;
        let counts = self.stores.registrations.registration_counts(event_id).await?;

        Ok(EventDetails {
            event,
            confirmed_count: counts.confirmed,
            waitlist_count: counts.waitlist,
        })
    }

    async fn moderate_event(
        &self,
        ctx: &RequestContext,
        command: Command,
        event_id: Uuid,
        to: EventStatus,
    ) -> Result<Event, WorkflowError> {
        let actor = ctx.require(command)?.user_id;
        let event = self.moderation.transition_event(event_id, to).await?;

        let transition = match to {
            EventStatus::Approved => WorkflowTransition::EventApproved {
                actor,
                event: event.clone(),
            },
            EventStatus::Rejected => WorkflowTransition::EventRejected {
                actor,
                event: event.clone(),
            },
            EventStatus::Completed => WorkflowTransition::EventCompleted {
                actor,
                event: event.clone(),
            },
            EventStatus::Cancelled => WorkflowTransition::EventCancelled {
                actor,
                event: event.clone(),
            },
            // Nothing moves an event back to pending.
            EventStatus::Pending => return Ok(event),
        };
        self.committed(transition).await;
        Ok(event)
    }

    pub async fn approve_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Event, WorkflowError> {
        self.moderate_event(ctx, Command::ApproveEvent, event_id, EventStatus::Approved)
            .await
    }

    pub async fn reject_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Event, WorkflowError> {
        self.moderate_event(ctx, Command::RejectEvent, event_id, EventStatus::Rejected)
            .await
    }

    pub async fn complete_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Event, WorkflowError> {
        self.moderate_event(ctx, Command::CompleteEvent, event_id, EventStatus::Completed)
            .await
    }

    pub async fn cancel_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Event, WorkflowError> {
        self.moderate_event(ctx, Command::CancelEvent, event_id, EventStatus::Cancelled)
            .await
    }

    // News

    pub async fn create_news(
        &self,
        ctx: &RequestContext,
        request: CreateNewsRequest,
    ) -> Result<NewsPost, WorkflowError> {
        let actor = ctx.require(Command::CreateNews)?;
        request.validate()?;
        validate_not_blank(&request.title)?;
        validate_not_blank(&request.content)?;

        let post = self
            .stores
            .news
            .insert_news(NewNewsPost::from_request(request, actor.user_id))
            .await?;

        self.committed(WorkflowTransition::NewsCreated {
            actor: actor.user_id,
            post: post.clone(),
        })
        .await;
        Ok(post)
    }

    pub async fn approve_news(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
    ) -> Result<NewsPost, WorkflowError> {
        let actor = ctx.require(Command::ApproveNews)?.user_id;
        let post = self
            .moderation
            .transition_news(post_id, NewsStatus::Published)
            .await?;

        self.committed(WorkflowTransition::NewsPublished {
            actor,
            post: post.clone(),
        })
        .await;
        Ok(post)
    }

    pub async fn reject_news(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
    ) -> Result<NewsPost, WorkflowError> {
        let actor = ctx.require(Command::RejectNews)?.user_id;
        let post = self
            .moderation
            .transition_news(post_id, NewsStatus::Rejected)
            .await?;

        self.committed(WorkflowTransition::NewsRejected {
            actor,
            post: post.clone(),
        })
        .await;
        Ok(post)
    }

    // Registration

    pub async fn register_for_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Registration, WorkflowError> {
        let actor = ctx.require(Command::Register)?.user_id;
        let event = self
            .stores
            .events
            .find_event(event_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Event not found".into()))?;

        let previous = self
            .stores
            .registrations
            .find_registration(event_id, actor)
            .await?
            .map(|r| r.status);
        let registration = self.registration.register(event_id, actor).await?;

        // A repeat that leaves the status alone is not a new transition.
        if previous == Some(registration.status) {
            return Ok(registration);
        }

        self.committed(WorkflowTransition::Registered {
            actor,
            event,
            registration: registration.clone(),
        })
        .await;
        Ok(registration)
    }

    pub async fn cancel_registration(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Registration, WorkflowError> {
        let actor = ctx.require(Command::CancelRegistration)?.user_id;
        let registration = self.registration.cancel(event_id, actor).await?;

        self.committed(WorkflowTransition::RegistrationCancelled {
            actor,
            registration: registration.clone(),
        })
        .await;
        Ok(registration)
    }

    pub async fn mark_attendance(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Registration, WorkflowError> {
        let actor = ctx.require(Command::MarkAttendance)?.user_id;
        let registration = self.registration.mark_attendance(event_id, user_id).await?;

        self.committed(WorkflowTransition::AttendanceMarked {
            actor,
            registration: registration.clone(),
        })
        .await;
        Ok(registration)
    }

    pub async fn submit_feedback(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        request: SubmitFeedbackRequest,
    ) -> Result<Feedback, WorkflowError> {
        let actor = ctx.require(Command::SubmitFeedback)?.user_id;
        let feedback = self
            .registration
            .submit_feedback(event_id, actor, request)
            .await?;

        self.committed(WorkflowTransition::FeedbackSubmitted {
            actor,
            feedback: feedback.clone(),
        })
        .await;
        Ok(feedback)
    }

    // Activity

    pub async fn my_activity(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ActivityLogEntry>, WorkflowError> {
        let actor = ctx.require(Command::ViewOwnActivity)?;
        Ok(self
            .stores
            .activity
            .list_for_user(actor.user_id, self.settings.user_activity_limit)
            .await?)
    }

    /// Activity of `user_id`. Callers may always see their own.
    pub async fn user_activity(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<ActivityLogEntry>, WorkflowError> {
        if ctx.current_user_id()? == user_id {
            return self.my_activity(ctx).await;
        }
        ctx.require(Command::ViewUserActivity)?;
        Ok(self
            .stores
            .activity
            .list_for_user(user_id, self.settings.user_activity_limit)
            .await?)
    }

    pub async fn all_activity(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ActivityLogEntry>, WorkflowError> {
        ctx.require(Command::ViewAllActivity)?;
        Ok(self
            .stores
            .activity
            .list_all(self.settings.global_activity_limit)
            .await?)
    }

    // Notifications

    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Notification>, WorkflowError> {
        let actor = ctx.require(Command::ManageNotifications)?;
        Ok(self
            .stores
            .notifications
            .list_for_user(actor.user_id, self.settings.notification_limit)
            .await?)
    }

    pub async fn unread_notification_count(
        &self,
        ctx: &RequestContext,
    ) -> Result<i64, WorkflowError> {
        let actor = ctx.require(Command::ManageNotifications)?;
        Ok(self.stores.notifications.unread_count(actor.user_id).await?)
    }

    pub async fn mark_notification_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), WorkflowError> {
        let actor = ctx.require(Command::ManageNotifications)?;
        if self
            .stores
            .notifications
            .mark_read(notification_id, actor.user_id)
            .await?
        {
            Ok(())
        } else {
            Err(WorkflowError::NotFound("Notification not found".into()))
        }
    }

    /// Returns how many notifications were flipped to read.
    pub async fn mark_all_notifications_read(
        &self,
        ctx: &RequestContext,
    ) -> Result<u64, WorkflowError> {
        let actor = ctx.require(Command::ManageNotifications)?;
        Ok(self.stores.notifications.mark_all_read(actor.user_id).await?)
    }

    pub async fn delete_notification(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), WorkflowError> {
        let actor = ctx.require(Command::ManageNotifications)?;
        if self
            .stores
            .notifications
            .delete(notification_id, actor.user_id)
            .await?
        {
            Ok(())
        } else {
            Err(WorkflowError::NotFound("Notification not found".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{ActivityAction, NotificationType, RegistrationStatus, Role};
    use crate::services::memory::InMemoryStore;
    use chrono::{Duration, Utc};
    use fake::faker::lorem::en::{Paragraph, Sentence};
    use fake::Fake;
    use std::sync::Arc;

    struct Harness {
        store: Arc<InMemoryStore>,
        coordinator: WorkflowCoordinator,
        student: RequestContext,
        moderator: RequestContext,
        admin: RequestContext,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryStore::new());
        let settings = CoordinatorSettings {
            side_effects: DispatchMode::Inline,
            ..CoordinatorSettings::default()
        };
        Harness {
            coordinator: WorkflowCoordinator::new(
                WorkflowStores::from_backend(store.clone()),
                settings,
            ),
            store,
            student: RequestContext::authenticated(Uuid::new_v4(), Role::Student),
            moderator: RequestContext::authenticated(Uuid::new_v4(), Role::ClubModerator),
            admin: RequestContext::authenticated(Uuid::new_v4(), Role::SystemAdmin),
        }
    }

    fn event_request(capacity: i32) -> CreateEventRequest {
        let start_at = Utc::now() + Duration::days(7);
        CreateEventRequest {
            club_id: Uuid::new_v4(),
            title: Sentence(2..5).fake(),
            description: Some(Paragraph(1..3).fake()),
            event_type: Some("social".to_string()),
            location: Some("Student union".to_string()),
            start_at,
            end_at: start_at + Duration::hours(3),
            registration_deadline: None,
            capacity,
        }
    }

    fn news_request() -> CreateNewsRequest {
        CreateNewsRequest {
            club_id: Uuid::new_v4(),
            title: Sentence(2..5).fake(),
            content: Paragraph(2..4).fake(),
            category: None,
            is_featured: true,
        }
    }

    #[tokio::test]
    async fn test_create_event_starts_pending_and_logs() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.student, event_request(10))
            .await
            .unwrap();
        assert_eq!(event.status, EventStatus::Pending);

        let activity = h.coordinator.my_activity(&h.student).await.unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].action, ActivityAction::EventCreated);
        assert_eq!(activity[0].entity_id, event.id);
    }

    #[tokio::test]
    async fn test_create_event_validation() {
        let h = harness();

        let mut blank = event_request(10);
        blank.title = "   ".to_string();
        let err = h.coordinator.create_event(&h.student, blank).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let mut backwards = event_request(10);
        backwards.end_at = backwards.start_at - Duration::hours(1);
        let err = h
            .coordinator
            .create_event(&h.student, backwards)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = h
            .coordinator
            .create_event(&h.student, event_request(-5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_create() {
        let h = harness();
        let err = h
            .coordinator
            .create_event(&RequestContext::anonymous(), event_request(10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_non_admin_approve_leaves_event_pending() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.student, event_request(10))
            .await
            .unwrap();

        for ctx in [&h.student, &h.moderator] {
            let err = h.coordinator.approve_event(ctx, event.id).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization);
        }

        let details = h.coordinator.event_details(&h.student, event.id).await.unwrap();
        assert_eq!(details.event.status, EventStatus::Pending);
    }

    #[tokio::test]
    async fn test_approve_notifies_creator_and_twice_conflicts() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.student, event_request(10))
            .await
            .unwrap();

        let approved = h.coordinator.approve_event(&h.admin, event.id).await.unwrap();
        assert_eq!(approved.status, EventStatus::Approved);

        let err = h
            .coordinator
            .approve_event(&h.admin, event.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let notices = h.coordinator.list_notifications(&h.student).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].notification_type, NotificationType::EventApproved);
    }

    #[tokio::test]
    async fn test_capacity_two_scenario_through_coordinator() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.moderator, event_request(2))
            .await
            .unwrap();
        h.coordinator.approve_event(&h.admin, event.id).await.unwrap();

        let a = RequestContext::authenticated(Uuid::new_v4(), Role::Student);
        let b = RequestContext::authenticated(Uuid::new_v4(), Role::Student);
        let c = RequestContext::authenticated(Uuid::new_v4(), Role::Student);

        let ra = h.coordinator.register_for_event(&a, event.id).await.unwrap();
        let rb = h.coordinator.register_for_event(&b, event.id).await.unwrap();
        let rc = h.coordinator.register_for_event(&c, event.id).await.unwrap();
        assert_eq!(ra.status, RegistrationStatus::Confirmed);
        assert_eq!(rb.status, RegistrationStatus::Confirmed);
        assert_eq!(rc.status, RegistrationStatus::Waitlist);

        h.coordinator.cancel_registration(&a, event.id).await.unwrap();

        let details = h.coordinator.event_details(&c, event.id).await.unwrap();
        assert_eq!(details.confirmed_count, 1);
        assert_eq!(details.waitlist_count, 1);

        let notices = h.coordinator.list_notifications(&c).await.unwrap();
        assert_eq!(
            notices[0].notification_type,
            NotificationType::RegistrationWaitlisted
        );
    }

    #[tokio::test]
    async fn test_repeat_registration_commits_once() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.moderator, event_request(2))
            .await
            .unwrap();

        let first = h
            .coordinator
            .register_for_event(&h.student, event.id)
            .await
            .unwrap();
        let second = h
            .coordinator
            .register_for_event(&h.student, event.id)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);

        let activity = h.coordinator.my_activity(&h.student).await.unwrap();
        assert_eq!(activity.len(), 1);
        let notices = h.coordinator.list_notifications(&h.student).await.unwrap();
        assert_eq!(notices.len(), 1);

        h.coordinator
            .cancel_registration(&h.student, event.id)
            .await
            .unwrap();
        h.coordinator
            .register_for_event(&h.student, event.id)
            .await
            .unwrap();
        let registered = h
            .coordinator
            .my_activity(&h.student)
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.action == ActivityAction::EventRegistered)
            .count();
        assert_eq!(registered, 2);
    }

    #[tokio::test]
    async fn test_side_effect_failure_does_not_fail_registration() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.student, event_request(3))
            .await
            .unwrap();

        h.store.fail_activity_writes(true);
        h.store.fail_notification_writes(true);

        let registration = h
            .coordinator
            .register_for_event(&h.student, event.id)
            .await
            .unwrap();
        assert_eq!(registration.status, RegistrationStatus::Confirmed);

        h.store.fail_activity_writes(false);
        h.store.fail_notification_writes(false);
        let activity = h.coordinator.my_activity(&h.student).await.unwrap();
        assert!(activity
            .iter()
            .all(|e| e.action != ActivityAction::EventRegistered));
    }

    #[tokio::test]
    async fn test_cancel_event_notifies_active_registrants() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.moderator, event_request(5))
            .await
            .unwrap();
        h.coordinator.approve_event(&h.admin, event.id).await.unwrap();

        let staying = RequestContext::authenticated(Uuid::new_v4(), Role::Student);
        let leaving = RequestContext::authenticated(Uuid::new_v4(), Role::Student);
        h.coordinator
            .register_for_event(&staying, event.id)
            .await
            .unwrap();
        h.coordinator
            .register_for_event(&leaving, event.id)
            .await
            .unwrap();
        h.coordinator
            .cancel_registration(&leaving, event.id)
            .await
            .unwrap();

        let err = h
            .coordinator
            .cancel_event(&h.student, event.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        h.coordinator
            .cancel_event(&h.moderator, event.id)
            .await
            .unwrap();

        let staying_notices = h.coordinator.list_notifications(&staying).await.unwrap();
        assert!(staying_notices
            .iter()
            .any(|n| n.notification_type == NotificationType::EventCancelled));

        let leaving_notices = h.coordinator.list_notifications(&leaving).await.unwrap();
        assert!(leaving_notices
            .iter()
            .all(|n| n.notification_type != NotificationType::EventCancelled));
    }

    #[tokio::test]
    async fn test_mark_attendance_requires_staff() {
        let h = harness();
        let event = h
            .coordinator
            .create_event(&h.moderator, event_request(5))
            .await
            .unwrap();
        let attendee = h.student.current_user_id().unwrap();
        h.coordinator
            .register_for_event(&h.student, event.id)
            .await
            .unwrap();

        let err = h
            .coordinator
            .mark_attendance(&h.student, event.id, attendee)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let registration = h
            .coordinator
            .mark_attendance(&h.moderator, event.id, attendee)
            .await
            .unwrap();
        assert!(registration.attendance_marked);
    }

    #[tokio::test]
    async fn test_news_publication_flow() {
        let h = harness();
        let post = h
            .coordinator
            .create_news(&h.student, news_request())
            .await
            .unwrap();
        assert_eq!(post.status, NewsStatus::Pending);

        let err = h
            .coordinator
            .approve_news(&h.moderator, post.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let published = h.coordinator.approve_news(&h.admin, post.id).await.unwrap();
        assert_eq!(published.status, NewsStatus::Published);
        assert!(published.published_at.is_some());

        let err = h
            .coordinator
            .reject_news(&h.admin, post.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let notices = h.coordinator.list_notifications(&h.student).await.unwrap();
        assert_eq!(notices[0].notification_type, NotificationType::NewsPublished);
    }

    #[tokio::test]
    async fn test_activity_visibility() {
        let h = harness();
        h.coordinator
            .create_news(&h.student, news_request())
            .await
            .unwrap();
        let student_id = h.student.current_user_id().unwrap();

        assert_eq!(
            h.coordinator
                .user_activity(&h.student, student_id)
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            h.coordinator
                .user_activity(&h.admin, student_id)
                .await
                .unwrap()
                .len(),
            1
        );

        let err = h
            .coordinator
            .user_activity(&h.moderator, student_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let err = h.coordinator.all_activity(&h.student).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(h.coordinator.all_activity(&h.admin).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_notification_operations() {
        let h = harness();
        for _ in 0..2 {
            let event = h
                .coordinator
                .create_event(&h.student, event_request(5))
                .await
                .unwrap();
            h.coordinator.reject_event(&h.admin, event.id).await.unwrap();
        }

        assert_eq!(
            h.coordinator
                .unread_notification_count(&h.student)
                .await
                .unwrap(),
            2
        );

        let notices = h.coordinator.list_notifications(&h.student).await.unwrap();
        let first = notices[0].id;

        let err = h
            .coordinator
            .mark_notification_read(&h.admin, first)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        h.coordinator
            .mark_notification_read(&h.student, first)
            .await
            .unwrap();
        assert_eq!(
            h.coordinator
                .unread_notification_count(&h.student)
                .await
                .unwrap(),
            1
        );

        assert_eq!(
            h.coordinator
                .mark_all_notifications_read(&h.student)
                .await
                .unwrap(),
            1
        );

        h.coordinator
            .delete_notification(&h.student, first)
            .await
            .unwrap();
        let err = h
            .coordinator
            .delete_notification(&h.student, first)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            h.coordinator
                .list_notifications(&h.student)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_activity_limit_applies() {
        let store = Arc::new(InMemoryStore::new());
        let coordinator = WorkflowCoordinator::new(
            WorkflowStores::from_backend(store),
            CoordinatorSettings {
                side_effects: DispatchMode::Inline,
                user_activity_limit: 2,
                ..CoordinatorSettings::default()
            },
        );
        let ctx = RequestContext::authenticated(Uuid::new_v4(), Role::Student);
        for _ in 0..4 {
            coordinator.create_news(&ctx, news_request()).await.unwrap();
        }

        assert_eq!(coordinator.my_activity(&ctx).await.unwrap().len(), 2);
    }
}
