use serde::{Deserialize, Serialize};

use crate::sentiment::score_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyTone {
    Friendly,
    Professional,
    Enthusiastic,
}

impl ReplyTone {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "friendly" | "casual" => Some(ReplyTone::Friendly),
            "professional" | "formal" => Some(ReplyTone::Professional),
            "enthusiastic" | "excited" => Some(ReplyTone::Enthusiastic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    pub fn from_score(score: i32) -> Self {
        if score > 0 {
            SentimentBucket::Positive
        } else if score < 0 {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }
}

pub fn reply_template(tone: ReplyTone, bucket: SentimentBucket) -> &'static str {
    match (tone, bucket) {
        (ReplyTone::Friendly, SentimentBucket::Positive) => {
            "Thank you so much! Really glad you enjoyed it."
        }
        (ReplyTone::Friendly, SentimentBucket::Neutral) => {
            "Thanks for stopping by! Let us know what you'd like to see next."
        }
        (ReplyTone::Friendly, SentimentBucket::Negative) => {
            "Sorry this missed the mark for you. We'd love to hear how we can make it better."
        }
        (ReplyTone::Professional, SentimentBucket::Positive) => {
            "Thank you for the kind feedback. We appreciate your support."
        }
        (ReplyTone::Professional, SentimentBucket::Neutral) => {
            "Thank you for your comment. Feel free to reach out with any questions."
        }
        (ReplyTone::Professional, SentimentBucket::Negative) => {
            "We're sorry to hear about your experience. Please send us a direct message so we can help."
        }
        (ReplyTone::Enthusiastic, SentimentBucket::Positive) => {
            "This made our day! Thanks for the love, more coming soon!"
        }
        (ReplyTone::Enthusiastic, SentimentBucket::Neutral) => {
            "Thanks for joining the conversation! Stay tuned, big things ahead!"
        }
        (ReplyTone::Enthusiastic, SentimentBucket::Negative) => {
            "We hear you! Thanks for being honest, we're on it and will do better."
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplySuggestion {
    pub tone: ReplyTone,
    pub bucket: SentimentBucket,
    pub score: i32,
    pub reply: String,
}

pub fn suggest_reply(comment: &str, tone: ReplyTone) -> ReplySuggestion {
    let score = score_text(comment).score;
    let bucket = SentimentBucket::from_score(score);
    ReplySuggestion {
        tone,
        bucket,
        score,
        reply: reply_template(tone, bucket).to_string(),
    }
}
