/// Feed Ranking Module
///
/// Deterministic, explainable ranking of a user's personalized feed.
///
/// # Pipeline
/// 1. **Interest Profiler**: tags on the user's own posts
/// 2. **Engagement Aggregator**: like and comment counts per candidate
/// 3. **Tag Matcher**: overlap between candidate tags and the profile
/// 4. **Time Decay Estimator**: `1 / (hours + 1)`
/// 5. **Score Composer**: weighted sum of the above
/// 6. **Feed Ranker**: sort, tie-break, paginate
///
/// Steps 2 to 5 run per candidate and concurrently; the sort waits for all of them.
pub mod decay;
pub mod engagement;
pub mod interest;
pub mod ranker;
pub mod scorer;
pub mod tag_match;

pub use decay::{hours_elapsed, time_decay};
pub use engagement::{aggregate_engagement, Engagement};
pub use interest::build_interest_profile;
pub use ranker::{rank_posts, FeedRanker, DEFAULT_SCORING_CONCURRENCY};
pub use scorer::{RankingWeights, ScoreComposer};
pub use tag_match::count_tag_matches;
