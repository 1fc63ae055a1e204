use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::decay::time_decay;
use super::engagement::aggregate_engagement;
use super::interest::build_interest_profile;
use super::scorer::{RankingWeights, ScoreComposer};
use super::tag_match::count_tag_matches;
use crate::db::FeedStore;
use crate::error::{AppError, Result};
use crate::metrics::feed::record_candidates_scored;
use crate::models::{FeedItem, FeedPage, InterestProfile, Post, ScoredPost};
use crate::services::pagination::{paginate, PageRequest, MAX_PAGE_SIZE};

/// Default number of candidates scored concurrently per request
pub const DEFAULT_SCORING_CONCURRENCY: usize = 16;

/// Feed Ranker
///
/// Builds one page of a user's personalized feed. Nothing is cached: every call
/// derives the interest profile and scores every candidate from scratch.
#[derive(Clone)]
pub struct FeedRanker {
    store: Arc<dyn FeedStore>,
    composer: ScoreComposer,
    max_page_size: u32,
    scoring_concurrency: usize,
}

impl FeedRanker {
    pub fn new(store: Arc<dyn FeedStore>, weights: RankingWeights) -> Self {
        Self {
            store,
            composer: ScoreComposer::new(weights),
            max_page_size: MAX_PAGE_SIZE,
            scoring_concurrency: DEFAULT_SCORING_CONCURRENCY,
        }
    }

    /// Never exceeds [`MAX_PAGE_SIZE`].
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_scoring_concurrency(mut self, scoring_concurrency: usize) -> Self {
        self.scoring_concurrency = scoring_concurrency.max(1);
        self
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Ranked page of the feed as of now.
    pub async fn get_feed(&self, user_id: Uuid, page: i64, page_size: i64) -> Result<FeedPage> {
        self.get_feed_at(user_id, page, page_size, Utc::now()).await
    }

    /// Ranked page of the feed with decay measured against `now`.
    pub async fn get_feed_at(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
        now: DateTime<Utc>,
    ) -> Result<FeedPage> {
        let request = PageRequest::new(page, page_size, self.max_page_size)?;

        if !self.store.user_exists(user_id).await? {
            return Err(AppError::NotFound(format!("User not found: {}", user_id)));
        }

        let profile = build_interest_profile(self.store.as_ref(), user_id).await?;

        let candidates: Vec<Post> = self
            .store
            .list_posts_not_authored_by(user_id)
            .await?
            .into_iter()
            .filter(|post| post.author_id != user_id)
            .collect();

        debug!(
            user_id = %user_id,
            candidate_count = candidates.len(),
            interest_tags = profile.len(),
            "Scoring feed candidates"
        );

        let scored = self.score_candidates(&profile, candidates, now).await?;
        record_candidates_scored(scored.len());

        let ranked = rank_posts(scored);
        let (page_items, pagination) = paginate(ranked, request);

        info!(
            user_id = %user_id,
            page = pagination.page,
            page_size = pagination.page_size,
            total_items = pagination.total_items,
            returned = page_items.len(),
            "Personalized feed generated"
        );

        Ok(FeedPage {
            items: page_items.into_iter().map(FeedItem::from).collect(),
            pagination,
        })
    }

    /// Score every candidate with bounded concurrency. The first store error
    /// aborts the batch.
    async fn score_candidates(
        &self,
        profile: &InterestProfile,
        candidates: Vec<Post>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredPost>> {
        stream::iter(candidates)
            .map(|post| self.score_post(profile, post, now))
            .buffer_unordered(self.scoring_concurrency)
            .try_collect()
            .await
    }

    async fn score_post(
        &self,
        profile: &InterestProfile,
        post: Post,
        now: DateTime<Utc>,
    ) -> Result<ScoredPost> {
        let (engagement, post_tags) = tokio::try_join!(
            aggregate_engagement(self.store.as_ref(), post.id),
            self.store.get_tags_of(post.id)
        )?;

        let tag_match_count = count_tag_matches(&post_tags, profile);
        let time_decay = time_decay(post.created_at, now);
        let score = self.composer.compose(
            engagement.like_count,
            engagement.comment_count,
            tag_match_count,
            time_decay,
        );

        Ok(ScoredPost {
            post,
            like_count: engagement.like_count,
            comment_count: engagement.comment_count,
            tag_match_count,
            time_decay,
            score,
        })
    }
}

/// Sort by score descending, then newest first, then post id so the order is
/// total and repeatable.
pub fn rank_posts(mut scored: Vec<ScoredPost>) -> Vec<ScoredPost> {
    scored.sort_by(compare_scored);
    scored
}

fn compare_scored(a: &ScoredPost, b: &ScoredPost) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.post.created_at.cmp(&a.post.created_at))
        .then_with(|| a.post.id.cmp(&b.post.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockFeedStore;
    use chrono::Duration;
    use std::collections::HashSet;

    fn scored(score: f64, created_at: DateTime<Utc>) -> ScoredPost {
        ScoredPost {
            post: Post {
                id: Uuid::new_v4(),
                author_id: Uuid::new_v4(),
                title: "t".to_string(),
                body: "b".to_string(),
                created_at,
                updated_at: created_at,
            },
            like_count: 0,
            comment_count: 0,
            tag_match_count: 0,
            time_decay: 0.0,
            score,
        }
    }

    #[test]
    fn test_rank_by_score_descending() {
        let now = Utc::now();
        let ranked = rank_posts(vec![scored(1.0, now), scored(5.0, now), scored(3.0, now)]);
        let scores: Vec<f64> = ranked.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_equal_scores_prefer_newer_posts() {
        let now = Utc::now();
        let older = scored(2.0, now - Duration::hours(3));
        let newer = scored(2.0, now - Duration::hours(1));
        let newer_id = newer.post.id;

        let ranked = rank_posts(vec![older, newer]);
        assert_eq!(ranked[0].post.id, newer_id);
    }

    #[test]
    fn test_full_ties_are_ordered_by_id() {
        let now = Utc::now();
        let a = scored(2.0, now);
        let b = scored(2.0, now);
        let mut expected = vec![a.post.id, b.post.id];
        expected.sort();

        let forward: Vec<Uuid> = rank_posts(vec![a.clone(), b.clone()])
            .iter()
            .map(|p| p.post.id)
            .collect();
        let backward: Vec<Uuid> = rank_posts(vec![b, a]).iter().map(|p| p.post.id).collect();

        assert_eq!(forward, expected);
        assert_eq!(backward, expected);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let mut store = MockFeedStore::new();
        store.expect_user_exists().returning(|_| Ok(false));
        store.expect_list_posts_not_authored_by().never();

        let ranker = FeedRanker::new(Arc::new(store), RankingWeights::default());
        let result = ranker.get_feed(Uuid::new_v4(), 1, 20).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_page_checked_before_store() {
        let mut store = MockFeedStore::new();
        store.expect_user_exists().never();

        let ranker = FeedRanker::new(Arc::new(store), RankingWeights::default());
        let result = ranker.get_feed(Uuid::new_v4(), 0, 20).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_dependency_failure_fails_whole_request() {
        let now = Utc::now();
        let posts: Vec<Post> = (0..4)
            .map(|i| scored(0.0, now - Duration::hours(i)).post)
            .collect();
        let failing_post = posts[2].id;

        let mut store = MockFeedStore::new();
        store.expect_user_exists().returning(|_| Ok(true));
        store
            .expect_list_tags_for_posts_authored_by()
            .returning(|_| Ok(HashSet::new()));
        store
            .expect_list_posts_not_authored_by()
            .returning(move |_| Ok(posts.clone()));
        store.expect_count_likes().returning(move |post_id| {
            if post_id == failing_post {
                Err(AppError::Dependency("likes query timed out".into()))
            } else {
                Ok(1)
            }
        });
        store.expect_count_comments().returning(|_| Ok(0));
        store.expect_get_tags_of().returning(|_| Ok(HashSet::new()));

        let ranker = FeedRanker::new(Arc::new(store), RankingWeights::default())
            .with_scoring_concurrency(2);
        let result = ranker.get_feed_at(Uuid::new_v4(), 1, 20, now).await;

        assert!(matches!(result, Err(AppError::Dependency(_))));
    }

    #[tokio::test]
    async fn test_interest_profile_loaded_once_per_request() {
        let now = Utc::now();
        let user = Uuid::new_v4();
        let posts: Vec<Post> = (0..10)
            .map(|i| scored(0.0, now - Duration::hours(i)).post)
            .collect();
        let expected: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let mut store = MockFeedStore::new();
        store.expect_user_exists().times(1).returning(|_| Ok(true));
        store
            .expect_list_tags_for_posts_authored_by()
            .times(1)
            .returning(|_| Ok(HashSet::from([Uuid::new_v4()])));
        store
            .expect_list_posts_not_authored_by()
            .times(1)
            .returning(move |_| Ok(posts.clone()));
        store.expect_count_likes().times(10).returning(|_| Ok(2));
        store.expect_count_comments().times(10).returning(|_| Ok(1));
        store
            .expect_get_tags_of()
            .times(10)
            .returning(|_| Ok(HashSet::new()));

        let ranker = FeedRanker::new(Arc::new(store), RankingWeights::default())
            .with_scoring_concurrency(4);
        let page = ranker.get_feed_at(user, 1, 20, now).await.unwrap();

        // Equal engagement, so freshness alone decides the order
        let ids: Vec<Uuid> = page.items.iter().map(|item| item.post.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_max_page_size_is_capped() {
        let store = MockFeedStore::new();
        let ranker = FeedRanker::new(Arc::new(store), RankingWeights::default());

        assert_eq!(ranker.clone().with_max_page_size(500).max_page_size(), MAX_PAGE_SIZE);
        assert_eq!(ranker.with_max_page_size(0).max_page_size(), 1);
    }

    #[tokio::test]
    async fn test_own_posts_filtered_even_if_store_returns_them() {
        let now = Utc::now();
        let user = Uuid::new_v4();
        let mut own = scored(0.0, now).post;
        own.author_id = user;
        let other = scored(0.0, now).post;
        let other_id = other.id;

        let mut store = MockFeedStore::new();
        store.expect_user_exists().returning(|_| Ok(true));
        store
            .expect_list_tags_for_posts_authored_by()
            .returning(|_| Ok(HashSet::new()));
        store
            .expect_list_posts_not_authored_by()
            .returning(move |_| Ok(vec![own.clone(), other.clone()]));
        store.expect_count_likes().returning(|_| Ok(0));
        store.expect_count_comments().returning(|_| Ok(0));
        store.expect_get_tags_of().returning(|_| Ok(HashSet::new()));

        let ranker = FeedRanker::new(Arc::new(store), RankingWeights::default());
        let page = ranker.get_feed_at(user, 1, 20, now).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].post.id, other_id);
    }
}
