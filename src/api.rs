use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use engagement_insights::best_time::PlatformBestTime;
use engagement_insights::cache::CacheStatus;
use engagement_insights::replies::{ReplySuggestion, ReplyTone};
use engagement_insights::{decode_records, EngagementEvent, EngagementReport, HistoricalPost};

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub posts: Vec<serde_json::Value>,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub persist: Option<bool>,
}

impl ApiAnalyzeRequest {
    pub fn into_records(
        self,
        warnings: &mut Vec<String>,
    ) -> (Vec<EngagementEvent>, Vec<HistoricalPost>, Vec<String>) {
        let (events, skipped_events) = decode_records::<EngagementEvent>(self.events);
        if skipped_events > 0 {
            warnings.push(format!("skipped {} malformed events", skipped_events));
        }
        let (posts, skipped_posts) = decode_records::<HistoricalPost>(self.posts);
        if skipped_posts > 0 {
            warnings.push(format!("skipped {} malformed posts", skipped_posts));
        }
        (events, posts, self.platforms)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub summary_id: Option<String>,
    pub report: EngagementReport,
    pub report_cache: CacheStatus,
    pub best_times: BTreeMap<String, PlatformBestTime>,
    pub best_times_cache: CacheStatus,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiBestTimesRequest {
    #[serde(default)]
    pub posts: Vec<serde_json::Value>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiBestTimesResponse {
    pub best_times: BTreeMap<String, PlatformBestTime>,
    pub cache: CacheStatus,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiReplyRequest {
    pub text: Option<String>,
    pub tone: Option<String>,
}

impl ApiReplyRequest {
    pub fn into_parts(self) -> Result<(String, ReplyTone), String> {
        let text = self.text.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err("text is required".to_string());
        }
        let tone = match self.tone.as_deref() {
            Some(tone) => {
                ReplyTone::from_str(tone).ok_or_else(|| format!("invalid tone: {}", tone))?
            }
            None => ReplyTone::Friendly,
        };
        Ok((text, tone))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiReplyResponse {
    #[serde(flatten)]
    pub suggestion: ReplySuggestion,
}

#[derive(Debug, Deserialize)]
pub struct ApiStatusRequest {
    pub status: String,
}
