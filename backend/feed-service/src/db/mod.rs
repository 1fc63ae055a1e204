//! Read-only access to the data the feed ranker consumes.
//!
//! Posts, tags, likes and comments are owned by other services. The ranker only
//! ever reads them through [`FeedStore`], so any backend that can answer these
//! six queries can drive a feed.

use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Post;

pub mod feed_repo;
pub mod memory;
pub mod pool;

pub use feed_repo::PgFeedRepo;
pub use memory::InMemoryFeedStore;
pub use pool::create_pool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool>;

    /// Every post whose author is not `user_id`.
    async fn list_posts_not_authored_by(&self, user_id: Uuid) -> Result<Vec<Post>>;

    /// Distinct tag ids attached to any post authored by `user_id`.
    async fn list_tags_for_posts_authored_by(&self, user_id: Uuid) -> Result<HashSet<Uuid>>;

    async fn count_likes(&self, post_id: Uuid) -> Result<u64>;

    async fn count_comments(&self, post_id: Uuid) -> Result<u64>;

    async fn get_tags_of(&self, post_id: Uuid) -> Result<HashSet<Uuid>>;
}
