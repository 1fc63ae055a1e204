use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

/// Post row as supplied by the store. Tags are fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub post_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Tags a user has attached to their own posts. Built fresh for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestProfile {
    pub user_id: Uuid,
    pub tag_ids: HashSet<Uuid>,
}

impl InterestProfile {
    pub fn new(user_id: Uuid, tag_ids: HashSet<Uuid>) -> Self {
        Self { user_id, tag_ids }
    }

    pub fn is_empty(&self) -> bool {
        self.tag_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tag_ids.len()
    }
}

/// A candidate post with every ranking signal attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPost {
    pub post: Post,
    pub like_count: u64,
    pub comment_count: u64,
    pub tag_match_count: u64,
    pub time_decay: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedItem {
    pub post: Post,
    pub like_count: u64,
    pub comment_count: u64,
    pub tag_match_count: u64,
    pub time_decay: f64,
    pub score: f64,
}

impl From<ScoredPost> for FeedItem {
    fn from(scored: ScoredPost) -> Self {
        Self {
            post: scored.post,
            like_count: scored.like_count,
            comment_count: scored.comment_count,
            tag_match_count: scored.tag_match_count,
            time_decay: scored.time_decay,
            score: scored.score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub pagination: Pagination,
}

/// HTTP envelope for `GET /api/v1/feeds/{user_id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<FeedItem>,
    pub pagination: Pagination,
}

impl FeedResponse {
    pub fn from_page(user_id: Uuid, page: FeedPage) -> Self {
        Self {
            success: true,
            message: format!("Personalized feed retrieved successfully for user {}", user_id),
            data: page.items,
            pagination: page.pagination,
        }
    }
}
