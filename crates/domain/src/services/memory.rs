//! In-memory implementation of the storage traits.
//!
//! Used by tests and local runs without a database. All state sits behind a
//! single `RwLock`, so each trait method is atomic with respect to every other.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{
    ActivityLogStore, EventStore, NewsStore, NotificationStore, RegistrationStore, StoreResult,
};
use crate::error::StoreError;
use crate::models::{
    ActivityLogEntry, CreateActivityLogInput, CreateNotificationInput, Event, EventStatus,
    Feedback, NewEvent, NewNewsPost, NewsPost, NewsStatus, Notification, Registration,
    RegistrationCounts, RegistrationStatus,
};

#[derive(Default)]
struct State {
    events: HashMap<Uuid, Event>,
    news: HashMap<Uuid, NewsPost>,
    registrations: HashMap<(Uuid, Uuid), Registration>,
    feedback: HashMap<(Uuid, Uuid), Feedback>,
    activity: Vec<ActivityLogEntry>,
    notifications: Vec<Notification>,
}

/// Process-local store for every workflow entity.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
    fail_activity: AtomicBool,
    fail_notifications: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every activity append fail until reset.
    pub fn fail_activity_writes(&self, fail: bool) {
        self.fail_activity.store(fail, Ordering::SeqCst);
    }

    /// Makes every notification insert fail until reset.
    pub fn fail_notification_writes(&self, fail: bool) {
        self.fail_notifications.store(fail, Ordering::SeqCst);
    }
}

fn confirmed_excluding(state: &State, event_id: Uuid, user_id: Uuid) -> i64 {
    state
        .registrations
        .values()
        .filter(|r| {
            r.event_id == event_id
                && r.user_id != user_id
                && r.status == RegistrationStatus::Confirmed
        })
        .count() as i64
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn insert_event(&self, input: NewEvent) -> StoreResult<Event> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            club_id: input.club_id,
            created_by: input.created_by,
            title: input.title,
            description: input.description,
            event_type: input.event_type,
            location: input.location,
            start_at: input.start_at,
            end_at: input.end_at,
            registration_deadline: input.registration_deadline,
            capacity: input.capacity,
            status: EventStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.write().await;
        state.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.state.read().await.events.get(&id).cloned())
    }

    async fn transition_event(
        &self,
        id: Uuid,
        from: &[EventStatus],
        to: EventStatus,
    ) -> StoreResult<Option<Event>> {
        let mut state = self.state.write().await;
        match state.events.get_mut(&id) {
            Some(event) if from.contains(&event.status) => {
                event.status = to;
                event.updated_at = Utc::now();
                Ok(Some(event.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl NewsStore for InMemoryStore {
    async fn insert_news(&self, input: NewNewsPost) -> StoreResult<NewsPost> {
        let now = Utc::now();
        let post = NewsPost {
            id: Uuid::new_v4(),
            club_id: input.club_id,
            author_id: input.author_id,
            title: input.title,
            content: input.content,
            category: input.category,
            is_featured: input.is_featured,
            status: NewsStatus::Pending,
            published_at: None,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.write().await;
        state.news.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_news(&self, id: Uuid) -> StoreResult<Option<NewsPost>> {
        Ok(self.state.read().await.news.get(&id).cloned())
    }

    async fn transition_news(
        &self,
        id: Uuid,
        from: &[NewsStatus],
        to: NewsStatus,
    ) -> StoreResult<Option<NewsPost>> {
        let mut state = self.state.write().await;
        match state.news.get_mut(&id) {
            Some(post) if from.contains(&post.status) => {
                let now = Utc::now();
                post.status = to;
                post.updated_at = now;
                if to == NewsStatus::Published {
                    post.published_at = Some(now);
                }
                Ok(Some(post.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl RegistrationStore for InMemoryStore {
    async fn register(&self, event_id: Uuid, user_id: Uuid) -> StoreResult<Option<Registration>> {
        let mut state = self.state.write().await;

        let capacity = match state.events.get(&event_id) {
            Some(event) => event.capacity,
            None => return Ok(None),
        };
        let status =
            RegistrationStatus::decide(capacity, confirmed_excluding(&state, event_id, user_id));

        let now = Utc::now();
        let registration = state
            .registrations
            .entry((event_id, user_id))
            .and_modify(|r| {
                r.status = status;
                r.updated_at = now;
            })
            .or_insert_with(|| Registration {
                id: Uuid::new_v4(),
                event_id,
                user_id,
                status,
                attendance_marked: false,
                feedback_submitted: false,
                registered_at: now,
                updated_at: now,
            });

        Ok(Some(registration.clone()))
    }

    async fn cancel_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        let mut state = self.state.write().await;
        Ok(state.registrations.get_mut(&(event_id, user_id)).map(|r| {
            r.status = RegistrationStatus::Cancelled;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn mark_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        let mut state = self.state.write().await;
        Ok(state.registrations.get_mut(&(event_id, user_id)).map(|r| {
            if !r.attendance_marked {
                r.attendance_marked = true;
                r.updated_at = Utc::now();
            }
            r.clone()
        }))
    }

    async fn upsert_feedback(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> StoreResult<Option<Feedback>> {
        let mut state = self.state.write().await;
        if !state.events.contains_key(&event_id) {
            return Ok(None);
        }

        let now = Utc::now();
        let feedback = state
            .feedback
            .entry((event_id, user_id))
            .and_modify(|f| {
                f.rating = rating;
                f.comment = comment.clone();
                f.updated_at = now;
            })
            .or_insert_with(|| Feedback {
                id: Uuid::new_v4(),
                event_id,
                user_id,
                rating,
                comment: comment.clone(),
                created_at: now,
                updated_at: now,
            })
            .clone();

        if let Some(registration) = state.registrations.get_mut(&(event_id, user_id)) {
            registration.feedback_submitted = true;
            registration.updated_at = now;
        }

        Ok(Some(feedback))
    }

    async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        Ok(self
            .state
            .read()
            .await
            .registrations
            .get(&(event_id, user_id))
            .cloned())
    }

    async fn list_registrations(&self, event_id: Uuid) -> StoreResult<Vec<Registration>> {
        let state = self.state.read().await;
        let mut registrations: Vec<Registration> = state
            .registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        registrations.sort_by_key(|r| r.registered_at);
        Ok(registrations)
    }

    async fn registration_counts(&self, event_id: Uuid) -> StoreResult<RegistrationCounts> {
        let state = self.state.read().await;
        let mut counts = RegistrationCounts::default();
        for r in state.registrations.values().filter(|r| r.event_id == event_id) {
            match r.status {
                RegistrationStatus::Confirmed => counts.confirmed += 1,
                RegistrationStatus::Waitlist => counts.waitlist += 1,
                RegistrationStatus::Cancelled => {}
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ActivityLogStore for InMemoryStore {
    async fn append(&self, input: CreateActivityLogInput) -> StoreResult<ActivityLogEntry> {
        if self.fail_activity.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("activity log unavailable".into()));
        }

        let entry = ActivityLogEntry {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            action: input.action,
            entity_type: input.entity_type,
            entity_id: input.entity_id,
            details: input.details,
            created_at: Utc::now(),
        };
        self.state.write().await.activity.push(entry.clone());
        Ok(entry)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ActivityLogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .activity
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self, limit: i64) -> StoreResult<Vec<ActivityLogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .activity
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn create(&self, input: CreateNotificationInput) -> StoreResult<Notification> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("notification store unavailable".into()));
        }

        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            title: input.title,
            message: input.message,
            notification_type: input.notification_type,
            related_entity_type: input.related_entity_type,
            related_entity_id: input.related_entity_id,
            is_read: false,
            created_at: Utc::now(),
        };
        self.state
            .write()
            .await
            .notifications
            .push(notification.clone());
        Ok(notification)
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Notification>> {
        let state = self.state.read().await;
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn unread_count(&self, user_id: Uuid) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Uuid) -> StoreResult<u64> {
        let mut state = self.state.write().await;
        let mut updated = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.notifications.len();
        state
            .notifications
            .retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(state.notifications.len() < before)
    }
}
