pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use db::{FeedStore, InMemoryFeedStore, PgFeedRepo};
pub use error::{AppError, Result};
pub use models::{FeedItem, FeedPage, FeedResponse, InterestProfile, Pagination, Post, ScoredPost};
pub use services::{FeedRanker, PageRequest, RankingWeights, ScoreComposer};
