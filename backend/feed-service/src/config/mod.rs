use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::services::pagination::MAX_PAGE_SIZE;
use crate::services::ranking::RankingWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub ranking: RankingConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
}

/// Score composer weights. Decay is always added unweighted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub like_weight: f64,
    pub comment_weight: f64,
    pub tag_match_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub scoring_concurrency: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        let weights = RankingWeights::default();
        Self {
            like_weight: weights.like,
            comment_weight: weights.comment,
            tag_match_weight: weights.tag_match,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            scoring_concurrency: default_scoring_concurrency(),
        }
    }
}

impl RankingConfig {
    pub fn weights(&self) -> RankingWeights {
        RankingWeights {
            like: self.like_weight,
            comment: self.comment_weight,
            tag_match: self.tag_match_weight,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let ranking_defaults = RankingConfig::default();

        let config = Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: env_or("APP_PORT", 8000)?,
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .context("DATABASE_URL environment variable not set")?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: env_or("DB_MIN_CONNECTIONS", 1)?,
                connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", 5)?,
                acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
            },
            ranking: RankingConfig {
                like_weight: env_or("RANKING_LIKE_WEIGHT", ranking_defaults.like_weight)?,
                comment_weight: env_or("RANKING_COMMENT_WEIGHT", ranking_defaults.comment_weight)?,
                tag_match_weight: env_or(
                    "RANKING_TAG_MATCH_WEIGHT",
                    ranking_defaults.tag_match_weight,
                )?,
            },
            feed: FeedConfig {
                default_page_size: env_or("FEED_DEFAULT_PAGE_SIZE", default_page_size())?,
                max_page_size: env_or("FEED_MAX_PAGE_SIZE", default_max_page_size())?,
                scoring_concurrency: env_or(
                    "FEED_SCORING_CONCURRENCY",
                    default_scoring_concurrency(),
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.ranking
            .weights()
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid RANKING_*_WEIGHT")?;

        if self.feed.max_page_size == 0 || self.feed.max_page_size > MAX_PAGE_SIZE {
            bail!(
                "FEED_MAX_PAGE_SIZE must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.feed.max_page_size
            );
        }
        if self.feed.default_page_size == 0 || self.feed.default_page_size > self.feed.max_page_size
        {
            bail!(
                "FEED_DEFAULT_PAGE_SIZE must be between 1 and {}",
                self.feed.max_page_size
            );
        }
        if self.feed.scoring_concurrency == 0 {
            bail!("FEED_SCORING_CONCURRENCY must be at least 1");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has invalid value '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_scoring_concurrency() -> usize {
    16
}
