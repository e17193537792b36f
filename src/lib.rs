pub mod best_time;
pub mod binning;
pub mod cache;
pub mod config;
pub mod forecast;
pub mod keywords;
pub mod recommendations;
pub mod replies;
pub mod sample;
pub mod scoring;
pub mod sentiment;
pub mod store;

use chrono::{
    DateTime, Datelike, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    Utc, Weekday,
};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::best_time::{BestTimeCalculator, PlatformBestTime};
use crate::binning::TimeSeries;
use crate::config::EngineConfig;
use crate::forecast::Prediction;
use crate::recommendations::{Recommendation, RecommendationInputs};
use crate::scoring::CompositeScorer;
use crate::sentiment::SentimentSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Like,
    Comment,
    Share,
}

impl EventKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "like" | "likes" | "favorite" => Some(EventKind::Like),
            "comment" | "comments" | "reply" => Some(EventKind::Comment),
            "share" | "shares" | "repost" => Some(EventKind::Share),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EventKind::from_str(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown event kind: {}", raw)))
    }
}

/// A single like, comment or share as delivered by the data source.
///
/// `timestamp` is kept raw; records whose timestamp does not parse are
/// skipped by every analysis step instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub kind: EventKind,
    pub timestamp: String,
    #[serde(alias = "postId")]
    pub post_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl EngagementEvent {
    pub fn new(kind: EventKind, timestamp: impl Into<String>, post_id: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp: timestamp.into(),
            post_id: post_id.into(),
            text: None,
            author: None,
        }
    }

    pub fn comment(
        timestamp: impl Into<String>,
        post_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let mut event = Self::new(EventKind::Comment, timestamp, post_id);
        event.text = Some(text.into());
        event
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "draft" => Some(PostStatus::Draft),
            "scheduled" => Some(PostStatus::Scheduled),
            "published" | "posted" => Some(PostStatus::Published),
            "failed" => Some(PostStatus::Failed),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for PostStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PostStatus::from_str(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown post status: {}", raw)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPost {
    pub platforms: Vec<String>,
    #[serde(alias = "scheduledTime")]
    pub scheduled_time: String,
    #[serde(default, alias = "engagementScore")]
    pub engagement_score: Option<i64>,
    pub status: PostStatus,
}

impl HistoricalPost {
    pub fn published(platforms: &[&str], scheduled_time: impl Into<String>, score: i64) -> Self {
        Self {
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            scheduled_time: scheduled_time.into(),
            engagement_score: Some(score),
            status: PostStatus::Published,
        }
    }

    pub fn targets(&self, platform: &str) -> bool {
        self.platforms
            .iter()
            .any(|candidate| normalize_platform(candidate) == normalize_platform(platform))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementTotals {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub likes: Prediction,
    pub comments: Prediction,
    pub shares: Prediction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementReport {
    pub series: TimeSeries,
    pub totals: EngagementTotals,
    pub sentiment: SentimentSummary,
    pub predictions: Predictions,
    pub composite_score: u8,
    pub recommendations: Vec<Recommendation>,
    pub skipped_events: usize,
}

/// Runs binning, sentiment, forecasting, composite scoring and the
/// recommendation rules over one snapshot of engagement events.
pub fn analyze_engagement(events: &[EngagementEvent], config: &EngineConfig) -> EngagementReport {
    let offset = config.time.utc_offset();
    let series = binning::bin_events(events, offset);
    let totals = series.totals();

    let comments: Vec<&str> = events
        .iter()
        .filter(|event| event.kind == EventKind::Comment)
        .filter(|event| parse_timestamp(&event.timestamp, offset).is_some())
        .filter_map(|event| event.text.as_deref())
        .collect();
    let sentiment = sentiment::summarize_comments(&comments, config.sentiment.trending_limit);

    let predictions = Predictions {
        likes: forecast::predict(&series.like_counts),
        comments: forecast::predict(&series.comment_counts),
        shares: forecast::predict(&series.share_counts),
    };

    let composite_score = CompositeScorer::new(config.composite.clone()).score(&totals, &sentiment);

    let recommendations = recommendations::generate_recommendations(
        &RecommendationInputs {
            average_sentiment: sentiment.average_score,
            totals,
            likes_trend: predictions.likes.trend,
            trending: &sentiment.trending,
        },
        &config.recommendations,
    );

    if series.skipped > 0 {
        tracing::warn!(skipped = series.skipped, "dropped events with unparseable timestamps");
    }
    tracing::debug!(
        bins = series.labels.len(),
        comments = sentiment.analyzed,
        composite_score,
        recommendations = recommendations.len(),
        "engagement analysis complete"
    );

    EngagementReport {
        skipped_events: series.skipped,
        series,
        totals,
        sentiment,
        predictions,
        composite_score,
        recommendations,
    }
}

/// Computes best posting times for each requested platform. An empty
/// request falls back to the configured defaults plus every platform seen
/// in the posts.
pub fn best_posting_times(
    posts: &[HistoricalPost],
    platforms: &[String],
    config: &EngineConfig,
) -> BTreeMap<String, PlatformBestTime> {
    let requested = if platforms.is_empty() {
        best_time::platforms_for(posts, &config.best_time.default_platforms)
    } else {
        platforms
            .iter()
            .map(|platform| normalize_platform(platform))
            .filter(|platform| !platform.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    let calculator = BestTimeCalculator::new(config.best_time.clone(), config.time.utc_offset());
    requested
        .into_iter()
        .map(|platform| {
            let result = calculator.calculate(&platform, posts);
            (platform, result)
        })
        .collect()
}

/// Decodes raw JSON records one by one, skipping any that do not match `T`.
/// Returns the decoded records and the number skipped.
pub fn decode_records<T: DeserializeOwned>(values: Vec<serde_json::Value>) -> (Vec<T>, usize) {
    let mut skipped = 0usize;
    let records = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed record");
                skipped += 1;
                None
            }
        })
        .collect();
    (records, skipped)
}

/// Parses the timestamp forms the data source is known to emit and shifts
/// the result into `offset`. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&offset));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });
    if let Some(naive) = naive {
        return Some(Utc.from_utc_datetime(&naive).with_timezone(&offset));
    }

    let millis = value.parse::<i64>().ok()?;
    match Utc.timestamp_millis_opt(millis) {
        LocalResult::Single(datetime) => Some(datetime.with_timezone(&offset)),
        _ => None,
    }
}

pub fn day_and_hour(timestamp: &DateTime<FixedOffset>) -> (DayOfWeek, u8) {
    (
        DayOfWeek::from_weekday(timestamp.weekday()),
        timestamp.hour() as u8,
    )
}

/// Lowercases a platform name and resolves the short aliases (`x`, `fb`,
/// `ig`, `yt`) to their canonical names.
pub fn normalize_platform(value: &str) -> String {
    let lowercase = value.trim().to_lowercase();
    let canonical = match lowercase.as_str() {
        "x" => "twitter",
        "fb" => "facebook",
        "ig" => "instagram",
        "yt" => "youtube",
        _ => return lowercase,
    };
    canonical.to_string()
}

/// Rounds to the nearest integer and clamps into 0..=100.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().max(0.0).min(100.0) as u8
}

pub fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_hour(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{}:00 {}", display, suffix)
}
