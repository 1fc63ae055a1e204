/// Score Composer
///
/// Linear blend of engagement, interest overlap and freshness:
///
/// `score = like*likes + comment*comments + tag_match*matches + decay`
use serde::{Deserialize, Serialize};

/// Per-signal weights. Decay is added as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    pub like: f64,
    pub comment: f64,
    pub tag_match: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            comment: 3.0,
            tag_match: 2.0,
        }
    }
}

impl RankingWeights {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("like", self.like),
            ("comment", self.comment),
            ("tag_match", self.tag_match),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{} weight must be a finite non-negative number, got {}",
                    name, value
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreComposer {
    weights: RankingWeights,
}

impl ScoreComposer {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> RankingWeights {
        self.weights
    }

    pub fn compose(
        &self,
        like_count: u64,
        comment_count: u64,
        tag_match_count: u64,
        decay: f64,
    ) -> f64 {
        self.weights.like * like_count as f64
            + self.weights.comment * comment_count as f64
            + self.weights.tag_match * tag_match_count as f64
            + decay
    }
}
