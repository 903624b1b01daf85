//! News post entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{NewsPost, NewsStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for news_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "news_status", rename_all = "lowercase")]
pub enum NewsStatusDb {
    Pending,
    Published,
    Rejected,
}

impl From<NewsStatusDb> for NewsStatus {
    fn from(db_status: NewsStatusDb) -> Self {
        match db_status {
            NewsStatusDb::Pending => NewsStatus::Pending,
            NewsStatusDb::Published => NewsStatus::Published,
            NewsStatusDb::Rejected => NewsStatus::Rejected,
        }
    }
}

impl From<NewsStatus> for NewsStatusDb {
    fn from(status: NewsStatus) -> Self {
        match status {
            NewsStatus::Pending => NewsStatusDb::Pending,
            NewsStatus::Published => NewsStatusDb::Published,
            NewsStatus::Rejected => NewsStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the news_posts table.
#[derive(Debug, Clone, FromRow)]
pub struct NewsPostEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub is_featured: bool,
    pub status: NewsStatusDb,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewsPostEntity> for NewsPost {
    fn from(entity: NewsPostEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            author_id: entity.author_id,
            title: entity.title,
            content: entity.content,
            category: entity.category,
            is_featured: entity.is_featured,
            status: entity.status.into(),
            published_at: entity.published_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
