//! Storage traits consumed by the workflow engine.
//!
//! Implementations must make each method atomic on its own. `register` in
//! particular must perform the capacity read, the decision and the upsert as
//! one serialized unit per event.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    ActivityLogEntry, CreateActivityLogInput, CreateNotificationInput, Event, EventStatus,
    Feedback, NewEvent, NewNewsPost, NewsPost, NewsStatus, Notification, Registration,
    RegistrationCounts,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert_event(&self, input: NewEvent) -> StoreResult<Event>;

    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>>;

    /// Moves the event to `to` if its current status is one of `from`.
    ///
    /// Returns `None` when no row matched, either because the event does not
    /// exist or because its status was not in `from`.
    async fn transition_event(
        &self,
        id: Uuid,
        from: &[EventStatus],
        to: EventStatus,
    ) -> StoreResult<Option<Event>>;
}

#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn insert_news(&self, input: NewNewsPost) -> StoreResult<NewsPost>;

    async fn find_news(&self, id: Uuid) -> StoreResult<Option<NewsPost>>;

    /// Conditional status change. Entering `published` also sets `published_at`.
    async fn transition_news(
        &self,
        id: Uuid,
        from: &[NewsStatus],
        to: NewsStatus,
    ) -> StoreResult<Option<NewsPost>>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Registers `user_id` for `event_id`, confirming or waitlisting by capacity.
    ///
    /// Returns `None` if the event does not exist.
    async fn register(&self, event_id: Uuid, user_id: Uuid) -> StoreResult<Option<Registration>>;

    /// Returns `None` if the user has no registration for the event.
    async fn cancel_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>>;

    /// Returns `None` if the user has no registration for the event.
    async fn mark_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>>;

    /// Upserts feedback and flags the registration, if any, in one unit.
    ///
    /// Returns `None` if the event does not exist.
    async fn upsert_feedback(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> StoreResult<Option<Feedback>>;

    async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>>;

    async fn list_registrations(&self, event_id: Uuid) -> StoreResult<Vec<Registration>>;

    async fn registration_counts(&self, event_id: Uuid) -> StoreResult<RegistrationCounts>;
}

#[async_trait]
pub trait ActivityLogStore: Send + Sync {
    async fn append(&self, input: CreateActivityLogInput) -> StoreResult<ActivityLogEntry>;

    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid, limit: i64)
        -> StoreResult<Vec<ActivityLogEntry>>;

    /// Newest first.
    async fn list_all(&self, limit: i64) -> StoreResult<Vec<ActivityLogEntry>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create(&self, input: CreateNotificationInput) -> StoreResult<Notification>;

    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Notification>>;

    async fn unread_count(&self, user_id: Uuid) -> StoreResult<i64>;

    /// Returns false if no notification with this id belongs to the user.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;

    /// Returns the number of notifications flipped to read.
    async fn mark_all_read(&self, user_id: Uuid) -> StoreResult<u64>;

    /// Returns false if no notification with this id belongs to the user.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;
}

/// Storage handles injected into the workflow engine.
#[derive(Clone)]
pub struct WorkflowStores {
    pub events: Arc<dyn EventStore>,
    pub news: Arc<dyn NewsStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub activity: Arc<dyn ActivityLogStore>,
    pub notifications: Arc<dyn NotificationStore>,
}

impl WorkflowStores {
    /// Uses one backend for every store.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: EventStore
            + NewsStore
            + RegistrationStore
            + ActivityLogStore
            + NotificationStore
            + 'static,
    {
        Self {
            events: backend.clone(),
            news: backend.clone(),
            registrations: backend.clone(),
            activity: backend.clone(),
            notifications: backend,
        }
    }
}
