//! News post repository for database operations.

use async_trait::async_trait;
use domain::models::{NewNewsPost, NewsPost, NewsStatus};
use domain::services::{NewsStore, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{NewsPostEntity, NewsStatusDb};
use crate::metrics::QueryTimer;

/// Repository for news post database operations.
#[derive(Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsStore for NewsRepository {
    async fn insert_news(&self, input: NewNewsPost) -> StoreResult<NewsPost> {
        let timer = QueryTimer::new("insert_news");
        let result = sqlx::query_as::<_, NewsPostEntity>(
            r#"
            INSERT INTO news_posts (club_id, author_id, title, content, category, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, club_id, author_id, title, content, category, is_featured, status,
                      published_at, created_at, updated_at
            "#,
        )
        .bind(input.club_id)
        .bind(input.author_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.category)
        .bind(input.is_featured)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    async fn find_news(&self, id: Uuid) -> StoreResult<Option<NewsPost>> {
        let timer = QueryTimer::new("find_news_by_id");
        let result = sqlx::query_as::<_, NewsPostEntity>(
            r#"
            SELECT id, club_id, author_id, title, content, category, is_featured, status,
                   published_at, created_at, updated_at
            FROM news_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    async fn transition_news(
        &self,
        id: Uuid,
        from: &[NewsStatus],
        to: NewsStatus,
    ) -> StoreResult<Option<NewsPost>> {
        let from: Vec<&'static str> = from.iter().map(|s| s.as_str()).collect();

        // published_at is only ever stamped on the way into 'published'.
        let timer = QueryTimer::new("transition_news");
        let result = sqlx::query_as::<_, NewsPostEntity>(
            r#"
            UPDATE news_posts
            SET status = $3,
                updated_at = NOW(),
                published_at = CASE WHEN $3 = 'published'::news_status THEN NOW() ELSE published_at END
            WHERE id = $1 AND status::text = ANY($2)
            RETURNING id, club_id, author_id, title, content, category, is_featured, status,
                      published_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&from)
        .bind(NewsStatusDb::from(to))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }
}
