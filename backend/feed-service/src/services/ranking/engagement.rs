use uuid::Uuid;

use crate::db::FeedStore;
use crate::error::Result;

/// Raw popularity counters for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    pub like_count: u64,
    pub comment_count: u64,
}

/// Count likes and comments on `post_id`. Both queries run concurrently and
/// either failure fails the whole lookup.
pub async fn aggregate_engagement(store: &dyn FeedStore, post_id: Uuid) -> Result<Engagement> {
    let (like_count, comment_count) =
        tokio::try_join!(store.count_likes(post_id), store.count_comments(post_id))?;

    Ok(Engagement {
        like_count,
        comment_count,
    })
}
