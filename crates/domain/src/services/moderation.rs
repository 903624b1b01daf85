//! Moderation state machine for events and news posts.
//!
//! Every transition is a single conditional write against the current status,
//! so concurrent attempts on the same entity produce exactly one winner.

use std::sync::Arc;
use uuid::Uuid;

use super::store::{EventStore, NewsStore};
use crate::error::WorkflowError;
use crate::models::{Event, EventStatus, NewsPost, NewsStatus};

pub struct ModerationEngine {
    events: Arc<dyn EventStore>,
    news: Arc<dyn NewsStore>,
}

impl ModerationEngine {
    pub fn new(events: Arc<dyn EventStore>, news: Arc<dyn NewsStore>) -> Self {
        Self { events, news }
    }

    /// Moves an event to `to` following the transition table.
    ///
    /// Fails with `NotFound` if the event is missing and `Conflict` if its
    /// current status does not allow the move.
    pub async fn transition_event(
        &self,
        event_id: Uuid,
        to: EventStatus,
    ) -> Result<Event, WorkflowError> {
        let from = EventStatus::sources_for(to);
        if let Some(event) = self.events.transition_event(event_id, from, to).await? {
            return Ok(event);
        }

        match self.events.find_event(event_id).await? {
            None => Err(WorkflowError::NotFound("Event not found".into())),
            Some(event) => Err(WorkflowError::Conflict(format!(
                "Event is {} and cannot become {}",
                event.status, to
            ))),
        }
    }

    /// Moves a news post to `to`. Publishing stamps `published_at`.
    pub async fn transition_news(
        &self,
        post_id: Uuid,
        to: NewsStatus,
    ) -> Result<NewsPost, WorkflowError> {
        let from = NewsStatus::sources_for(to);
        if let Some(post) = self.news.transition_news(post_id, from, to).await? {
            return Ok(post);
        }

        match self.news.find_news(post_id).await? {
            None => Err(WorkflowError::NotFound("News post not found".into())),
            Some(post) => Err(WorkflowError::Conflict(format!(
                "News post is {} and cannot become {}",
                post.status, to
            ))),
        }
    }
}
