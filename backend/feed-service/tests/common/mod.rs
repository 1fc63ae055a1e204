//! Shared fixtures for feed-service integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use feed_service::models::{Comment, Like, Tag};
use feed_service::{FeedRanker, InMemoryFeedStore, Post, RankingWeights};

/// A fixed clock so decay values are exact.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub struct Fixture {
    pub store: InMemoryFeedStore,
    pub now: DateTime<Utc>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: InMemoryFeedStore::new(),
            now: fixed_now(),
        }
    }

    pub fn user(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.store.add_user(id);
        id
    }

    pub fn tag(&mut self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        assert!(self.store.add_tag(Tag {
            id,
            name: name.to_string(),
        }));
        id
    }

    /// Post by `author` created `hours_ago` before the fixture clock.
    pub fn post(&mut self, author: Uuid, hours_ago: i64, tags: &[Uuid]) -> Uuid {
        let created_at = self.now - Duration::hours(hours_ago);
        let post = Post {
            id: Uuid::new_v4(),
            author_id: author,
            title: format!("Post by {}", author),
            body: "Content".to_string(),
            created_at,
            updated_at: created_at,
        };
        let id = post.id;
        for tag in tags {
            self.store.tag_post(id, *tag);
        }
        self.store.add_post(post);
        id
    }

    /// `count` likes on `post_id` from fresh users.
    pub fn likes(&mut self, post_id: Uuid, count: usize) {
        for _ in 0..count {
            let user_id = self.user();
            self.store.add_like(Like { post_id, user_id });
        }
    }

    pub fn comments(&mut self, post_id: Uuid, author_id: Uuid, count: usize) {
        for _ in 0..count {
            self.store.add_comment(Comment {
                id: Uuid::new_v4(),
                post_id,
                author_id,
                created_at: self.now,
            });
        }
    }

    pub fn ranker(self) -> FeedRanker {
        FeedRanker::new(Arc::new(self.store), RankingWeights::default())
    }
}
