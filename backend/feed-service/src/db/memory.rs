//! In-memory [`FeedStore`] for tests and local runs without PostgreSQL.
//!
//! Populate it through the `&mut self` builders, then share it behind an `Arc`.
//! Once shared it is read-only, same as the real tables from the ranker's view.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::FeedStore;
use crate::error::Result;
use crate::models::{Comment, Like, Post, Tag};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedStore {
    users: HashSet<Uuid>,
    posts: Vec<Post>,
    tags: HashMap<Uuid, Tag>,
    post_tags: HashMap<Uuid, HashSet<Uuid>>,
    likes: HashSet<Like>,
    comments: Vec<Comment>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user_id: Uuid) {
        self.users.insert(user_id);
    }

    pub fn add_post(&mut self, post: Post) {
        self.users.insert(post.author_id);
        self.posts.push(post);
    }

    /// Returns false when a tag with the same name already exists.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if tag.name.is_empty() || self.tags.values().any(|t| t.name == tag.name) {
            return false;
        }
        self.tags.insert(tag.id, tag);
        true
    }

    pub fn tag_post(&mut self, post_id: Uuid, tag_id: Uuid) {
        self.post_tags.entry(post_id).or_default().insert(tag_id);
    }

    /// Returns false if this user already liked this post.
    pub fn add_like(&mut self, like: Like) -> bool {
        self.likes.insert(like)
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.users.contains(&user_id))
    }

    async fn list_posts_not_authored_by(&self, user_id: Uuid) -> Result<Vec<Post>> {
        Ok(self
            .posts
            .iter()
            .filter(|p| p.author_id != user_id)
            .cloned()
            .collect())
    }

    async fn list_tags_for_posts_authored_by(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self
            .posts
            .iter()
            .filter(|p| p.author_id == user_id)
            .filter_map(|p| self.post_tags.get(&p.id))
            .flatten()
            .copied()
            .collect())
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<u64> {
        Ok(self.likes.iter().filter(|l| l.post_id == post_id).count() as u64)
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<u64> {
        Ok(self.comments.iter().filter(|c| c.post_id == post_id).count() as u64)
    }

    async fn get_tags_of(&self, post_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self.post_tags.get(&post_id).cloned().unwrap_or_default())
    }
}
