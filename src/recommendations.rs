use serde::{Deserialize, Serialize};

use crate::forecast::TrendDirection;
use crate::sentiment::KeywordFrequency;
use crate::EngagementTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Active,
    Applied,
    Dismissed,
}

impl RecommendationStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(RecommendationStatus::Active),
            "applied" => Some(RecommendationStatus::Applied),
            "dismissed" => Some(RecommendationStatus::Dismissed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub status: RecommendationStatus,
}

impl Recommendation {
    fn active(kind: RecommendationKind, priority: Priority, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
            priority,
            status: RecommendationStatus::Active,
        }
    }

    /// Status changes belong to the caller; the engine only emits `Active`.
    pub fn with_status(mut self, status: RecommendationStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub min_comments: u64,
    pub share_rate_threshold: f64,
    pub quoted_terms: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_comments: 5,
            share_rate_threshold: 0.3,
            quoted_terms: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationInputs<'a> {
    pub average_sentiment: f64,
    pub totals: EngagementTotals,
    pub likes_trend: TrendDirection,
    pub trending: &'a [KeywordFrequency],
}

pub const TITLE_SENTIMENT: &str = "Improve Content Sentiment";
pub const TITLE_ENGAGEMENT: &str = "Boost Engagement";
pub const TITLE_DECLINING_LIKES: &str = "Declining Likes Trend";
pub const TITLE_TRENDING: &str = "Trending Topics Identified";
pub const TITLE_SHARE_RATE: &str = "High Share Rate";

/// Evaluates the rule table in its fixed order. Every rule fires at most
/// once and the output order never depends on the inputs.
pub fn generate_recommendations(
    inputs: &RecommendationInputs<'_>,
    config: &RecommendationConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let totals = &inputs.totals;

    if inputs.average_sentiment < 0.0 {
        recommendations.push(Recommendation::active(
            RecommendationKind::Warning,
            Priority::High,
            TITLE_SENTIMENT,
            "Recent comments lean negative. Address common complaints directly and balance critical topics with more positive, value-driven posts.".to_string(),
        ));
    }
    if totals.comments < config.min_comments {
        recommendations.push(Recommendation::active(
            RecommendationKind::Info,
            Priority::Medium,
            TITLE_ENGAGEMENT,
            format!(
                "Only {} comment{} so far. Ask open questions, run polls or reply to every comment to start more conversations.",
                totals.comments,
                if totals.comments == 1 { "" } else { "s" }
            ),
        ));
    }
    if inputs.likes_trend == TrendDirection::Down {
        recommendations.push(Recommendation::active(
            RecommendationKind::Warning,
            Priority::High,
            TITLE_DECLINING_LIKES,
            "Likes are forecast to drop next period. Refresh your visual style, try a new format or post at your best-performing times.".to_string(),
        ));
    }
    if !inputs.trending.is_empty() {
        let terms: Vec<&str> = inputs
            .trending
            .iter()
            .take(config.quoted_terms.max(1))
            .map(|keyword| keyword.term.as_str())
            .collect();
        recommendations.push(Recommendation::active(
            RecommendationKind::Success,
            Priority::Medium,
            TITLE_TRENDING,
            format!(
                "Your audience keeps talking about {}. Build upcoming content around these topics.",
                terms.join(", ")
            ),
        ));
    }
    if totals.shares as f64 > config.share_rate_threshold * totals.likes as f64 {
        recommendations.push(Recommendation::active(
            RecommendationKind::Success,
            Priority::Low,
            TITLE_SHARE_RATE,
            format!(
                "{} shares against {} likes. This content travels well; create more in the same style.",
                totals.shares, totals.likes
            ),
        ));
    }

    recommendations
}
