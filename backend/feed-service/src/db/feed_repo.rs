/// Feed Repository
///
/// PostgreSQL reads backing the feed ranker
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::error;
use uuid::Uuid;

use super::FeedStore;
use crate::error::{AppError, Result};
use crate::models::Post;

/// Feed Repository
#[derive(Clone)]
pub struct PgFeedRepo {
    pool: PgPool,
}

impl PgFeedRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_for_post(&self, query: &str, post_id: Uuid, what: &str) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(query)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(post_id = %post_id, "Failed to count {}: {}", what, e);
                AppError::Dependency(e.to_string())
            })?;

        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl FeedStore for PgFeedRepo {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, "Failed to look up user: {}", e);
                AppError::Dependency(e.to_string())
            })
    }

    async fn list_posts_not_authored_by(&self, user_id: Uuid) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<
            _,
            (
                Uuid,          // id
                Uuid,          // author_id
                String,        // title
                String,        // body
                DateTime<Utc>, // created_at
                DateTime<Utc>, // updated_at
            ),
        >(
            r#"
            SELECT id, author_id, title, body, created_at, updated_at
            FROM posts
            WHERE author_id <> $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(user_id = %user_id, "Failed to list candidate posts: {}", e);
            AppError::Dependency(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(
                |(id, author_id, title, body, created_at, updated_at)| Post {
                    id,
                    author_id,
                    title,
                    body,
                    created_at,
                    updated_at,
                },
            )
            .collect())
    }

    async fn list_tags_for_posts_authored_by(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let tag_ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT pt.tag_id
            FROM post_tags pt
            JOIN posts p ON p.id = pt.post_id
            WHERE p.author_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(user_id = %user_id, "Failed to load interest tags: {}", e);
            AppError::Dependency(e.to_string())
        })?;

        Ok(tag_ids.into_iter().collect())
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<u64> {
        self.count_for_post(
            "SELECT COUNT(*) FROM likes WHERE post_id = $1",
            post_id,
            "likes",
        )
        .await
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<u64> {
        self.count_for_post(
            "SELECT COUNT(*) FROM comments WHERE post_id = $1",
            post_id,
            "comments",
        )
        .await
    }

    async fn get_tags_of(&self, post_id: Uuid) -> Result<HashSet<Uuid>> {
        let tag_ids =
            sqlx::query_scalar::<_, Uuid>("SELECT tag_id FROM post_tags WHERE post_id = $1")
                .bind(post_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!(post_id = %post_id, "Failed to load post tags: {}", e);
                    AppError::Dependency(e.to_string())
                })?;

        Ok(tag_ids.into_iter().collect())
    }
}
