use serde::{Deserialize, Serialize};

use crate::EngagementTotals;

/// Per-action volume weights. Comments and shares count for more than a
/// passive like.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
    pub like: f64,
    pub comment: f64,
    pub share: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            comment: 3.0,
            share: 5.0,
        }
    }
}

impl EngagementWeights {
    /// Negative weights would break monotonicity of the composite score.
    pub fn sanitized(&self) -> Self {
        Self {
            like: non_negative(self.like),
            comment: non_negative(self.comment),
            share: non_negative(self.share),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: EngagementWeights,
}

impl WeightedScorer {
    pub fn new(weights: EngagementWeights) -> Self {
        Self {
            weights: weights.sanitized(),
        }
    }

    pub fn score(&self, totals: &EngagementTotals) -> f64 {
        let mut score = 0.0;

        score += totals.likes as f64 * self.weights.like;
        score += totals.comments as f64 * self.weights.comment;
        score += totals.shares as f64 * self.weights.share;

        score
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}
