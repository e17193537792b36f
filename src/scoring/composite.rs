use serde::{Deserialize, Serialize};

use crate::scoring::{EngagementWeights, WeightedScorer};
use crate::sentiment::SentimentSummary;
use crate::{clamp_score, EngagementTotals};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    pub weights: EngagementWeights,
    pub divisor: f64,
    pub baseline: f64,
    pub positive_bonus: f64,
    pub negative_penalty: f64,
    pub negative_threshold: f64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            weights: EngagementWeights::default(),
            divisor: 10.0,
            baseline: 40.0,
            positive_bonus: 20.0,
            negative_penalty: -10.0,
            negative_threshold: -1.0,
        }
    }
}

/// Blends weighted engagement volume and comment sentiment into a 0-100
/// score.
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    weighted: WeightedScorer,
    config: CompositeConfig,
}

impl CompositeScorer {
    pub fn new(config: CompositeConfig) -> Self {
        Self {
            weighted: WeightedScorer::new(config.weights.clone()),
            config,
        }
    }

    pub fn sentiment_bonus(&self, average_sentiment: f64) -> f64 {
        if average_sentiment > 0.0 {
            self.config.positive_bonus
        } else if average_sentiment < self.config.negative_threshold {
            self.config.negative_penalty
        } else {
            0.0
        }
    }

    pub fn raw_score(&self, totals: &EngagementTotals, sentiment: &SentimentSummary) -> f64 {
        let divisor = self.config.divisor.max(1.0);
        self.weighted.score(totals) / divisor
            + self.sentiment_bonus(sentiment.average_score)
            + self.config.baseline
    }

    pub fn score(&self, totals: &EngagementTotals, sentiment: &SentimentSummary) -> u8 {
        clamp_score(self.raw_score(totals, sentiment))
    }
}
