use std::collections::HashSet;
use uuid::Uuid;

use crate::models::InterestProfile;

/// Number of the post's tags that also appear in the user's interest profile.
pub fn count_tag_matches(post_tags: &HashSet<Uuid>, profile: &InterestProfile) -> u64 {
    // Walk the smaller set
    let (small, large) = if post_tags.len() <= profile.tag_ids.len() {
        (post_tags, &profile.tag_ids)
    } else {
        (&profile.tag_ids, post_tags)
    };

    small.iter().filter(|tag| large.contains(tag)).count() as u64
}
