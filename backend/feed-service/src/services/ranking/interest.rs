use tracing::debug;
use uuid::Uuid;

use crate::db::FeedStore;
use crate::error::Result;
use crate::models::InterestProfile;

/// Derive a user's interests from the tags on posts they authored.
///
/// A user without posts gets an empty profile, which is valid.
pub async fn build_interest_profile(
    store: &dyn FeedStore,
    user_id: Uuid,
) -> Result<InterestProfile> {
    let tag_ids = store.list_tags_for_posts_authored_by(user_id).await?;

    debug!(user_id = %user_id, interest_tags = tag_ids.len(), "Interest profile built");

    Ok(InterestProfile::new(user_id, tag_ids))
}
