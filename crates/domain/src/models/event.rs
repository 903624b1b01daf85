//! Event domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if the transition table allows moving from `self` to `to`.
    pub fn can_transition_to(&self, to: EventStatus) -> bool {
        EventStatus::sources_for(to).contains(self)
    }

    /// States from which `to` may be entered.
    pub fn sources_for(to: EventStatus) -> &'static [EventStatus] {
        match to {
            EventStatus::Approved | EventStatus::Rejected => &[EventStatus::Pending],
            EventStatus::Completed => &[EventStatus::Approved],
            EventStatus::Cancelled => &[EventStatus::Pending, EventStatus::Approved],
            EventStatus::Pending => &[],
        }
    }

    /// Returns true if no further transitions leave this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventStatus::Rejected | EventStatus::Completed | EventStatus::Cancelled
        )
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(EventStatus::Pending),
            "approved" => Ok(EventStatus::Approved),
            "rejected" => Ok(EventStatus::Rejected),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            _ => Err(format!("Invalid event status: {}", s)),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A club event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
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
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventRequest {
    pub club_id: Uuid,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 50, message = "Event type must be at most 50 characters"))]
    pub event_type: Option<String>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,

    #[validate(range(min = 0, message = "Capacity must be non-negative"))]
    pub capacity: i32,
}

/// Data handed to storage when inserting a new event.
#[derive(Debug, Clone)]
pub struct NewEvent {
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
}

impl NewEvent {
    pub fn from_request(request: CreateEventRequest, created_by: Uuid) -> Self {
        Self {
            club_id: request.club_id,
            created_by,
            title: request.title.trim().to_string(),
            description: request.description,
            event_type: request.event_type,
            location: request.location,
            start_at: request.start_at,
            end_at: request.end_at,
            registration_deadline: request.registration_deadline,
            capacity: request.capacity,
        }
    }
}

/// Event together with its registration counts.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub confirmed_count: i64,
    pub waitlist_count: i64,
}
