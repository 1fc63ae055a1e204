//! Service layer for feed-service
//!
//! - ranking: interest profile, scoring and ordering of the personalized feed
//! - pagination: page-number slicing of a ranked list

pub mod pagination;
pub mod ranking;

pub use pagination::{paginate, PageRequest, MAX_PAGE_SIZE};
pub use ranking::{FeedRanker, RankingWeights, ScoreComposer};
