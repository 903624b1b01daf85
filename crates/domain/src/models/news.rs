//! News post domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Moderation status of a news post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsStatus {
    Pending,
    Published,
    Rejected,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Pending => "pending",
            NewsStatus::Published => "published",
            NewsStatus::Rejected => "rejected",
        }
    }

    /// States from which `to` may be entered.
    pub fn sources_for(to: NewsStatus) -> &'static [NewsStatus] {
        match to {
            NewsStatus::Published | NewsStatus::Rejected => &[NewsStatus::Pending],
            NewsStatus::Pending => &[],
        }
    }

    pub fn can_transition_to(&self, to: NewsStatus) -> bool {
        NewsStatus::sources_for(to).contains(self)
    }
}

impl FromStr for NewsStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(NewsStatus::Pending),
            "published" => Ok(NewsStatus::Published),
            "rejected" => Ok(NewsStatus::Rejected),
            _ => Err(format!("Invalid news status: {}", s)),
        }
    }
}

impl fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A club news post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NewsPost {
    pub id: Uuid,
    pub club_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub is_featured: bool,
    pub status: NewsStatus,
    /// Set once, when the post is published.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a news post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateNewsRequest {
    pub club_id: Uuid,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,

    #[serde(default)]
    pub is_featured: bool,
}

/// Data handed to storage when inserting a new post.
#[derive(Debug, Clone)]
pub struct NewNewsPost {
    pub club_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub is_featured: bool,
}

impl NewNewsPost {
    pub fn from_request(request: CreateNewsRequest, author_id: Uuid) -> Self {
        Self {
            club_id: request.club_id,
            author_id,
            title: request.title.trim().to_string(),
            content: request.content,
            category: request.category,
            is_featured: request.is_featured,
        }
    }
}
