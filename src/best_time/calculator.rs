use chrono::FixedOffset;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::best_time::heuristics::{self, PlatformHeuristic};
use crate::{
    clamp_score, day_and_hour, normalize_platform, parse_timestamp, stable_hash64, DayOfWeek,
    HistoricalPost, PostStatus,
};

/// High confidence is never reported below this many posts, whatever the
/// configuration says.
pub const MIN_POSTS_FOR_HIGH_CONFIDENCE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBreakdown {
    pub hour: u8,
    pub engagement_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBestTime {
    pub platform: String,
    pub recommended_day: DayOfWeek,
    pub recommended_hour: u8,
    pub engagement_score: u8,
    pub confidence: Confidence,
    pub posts_analyzed: usize,
    pub daily_breakdown: BTreeMap<DayOfWeek, DayBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BestTimeConfig {
    pub min_posts_for_high_confidence: usize,
    /// Maximum +/- points applied to the fallback score when the platform
    /// has some posts but not enough for an empirical answer. 0 disables it.
    pub fallback_jitter: f64,
    pub jitter_seed: u64,
    pub default_platforms: Vec<String>,
}

impl Default for BestTimeConfig {
    fn default() -> Self {
        Self {
            min_posts_for_high_confidence: MIN_POSTS_FOR_HIGH_CONFIDENCE,
            fallback_jitter: 0.0,
            jitter_seed: 42,
            default_platforms: vec![
                "instagram".to_string(),
                "facebook".to_string(),
                "twitter".to_string(),
                "linkedin".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub day: DayOfWeek,
    pub hour: u8,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct BestTimeCalculator {
    config: BestTimeConfig,
    offset: FixedOffset,
}

impl BestTimeCalculator {
    pub fn new(config: BestTimeConfig, offset: FixedOffset) -> Self {
        Self { config, offset }
    }

    /// Published posts for `platform` with a score and a parseable time.
    pub fn observations(&self, platform: &str, posts: &[HistoricalPost]) -> Vec<Observation> {
        posts
            .iter()
            .filter(|post| post.status == PostStatus::Published && post.targets(platform))
            .filter_map(|post| {
                let score = post.engagement_score?;
                let timestamp = parse_timestamp(&post.scheduled_time, self.offset)?;
                let (day, hour) = day_and_hour(&timestamp);
                Some(Observation {
                    day,
                    hour,
                    score: score as f64,
                })
            })
            .collect()
    }

    pub fn calculate(&self, platform: &str, posts: &[HistoricalPost]) -> PlatformBestTime {
        let platform = normalize_platform(platform);
        let heuristic = heuristics::for_platform(&platform);
        let observations = self.observations(&platform, posts);
        let min_posts = self
            .config
            .min_posts_for_high_confidence
            .max(MIN_POSTS_FOR_HIGH_CONFIDENCE);

        let result = if observations.len() >= min_posts {
            empirical(&platform, heuristic, &observations)
        } else if observations.is_empty() {
            fallback(&platform, heuristic, 0, Confidence::Low, 0.0)
        } else {
            let jitter = self.jitter(&platform);
            fallback(
                &platform,
                heuristic,
                observations.len(),
                Confidence::Medium,
                jitter,
            )
        };

        tracing::debug!(
            platform = %result.platform,
            posts = result.posts_analyzed,
            confidence = result.confidence.label(),
            "best posting time computed"
        );
        result
    }

    fn jitter(&self, platform: &str) -> f64 {
        let bound = self.config.fallback_jitter;
        if bound.is_nan() || bound <= 0.0 {
            return 0.0;
        }
        // scores live in 0..=100, so a wider swing only saturates
        let bound = bound.min(100.0);
        let mut rng = StdRng::seed_from_u64(self.config.jitter_seed ^ stable_hash64(platform));
        rng.gen_range(-bound..=bound)
    }
}

fn empirical(
    platform: &str,
    heuristic: &PlatformHeuristic,
    observations: &[Observation],
) -> PlatformBestTime {
    let mut by_slot: BTreeMap<(DayOfWeek, u8), Mean> = BTreeMap::new();
    let mut by_day: BTreeMap<DayOfWeek, Mean> = BTreeMap::new();
    let mut by_hour: BTreeMap<u8, Mean> = BTreeMap::new();

    for observation in observations {
        by_slot
            .entry((observation.day, observation.hour))
            .or_default()
            .add(observation.score);
        by_day.entry(observation.day).or_default().add(observation.score);
        by_hour.entry(observation.hour).or_default().add(observation.score);
    }

    // Day and hour are maximised independently of each other.
    let (recommended_day, day_mean) = best_of(&by_day).unwrap_or((heuristic.peak_day, 0.0));
    let (recommended_hour, _) = best_of(&by_hour).unwrap_or((heuristic.peak().hour, 0.0));

    let daily_breakdown = DayOfWeek::ALL
        .iter()
        .map(|day| {
            let observed = by_slot
                .range((*day, 0)..=(*day, 23))
                .map(|((_, hour), mean)| (*hour, mean.value()))
                .fold(None, |best: Option<(u8, f64)>, candidate| match best {
                    Some(current) if current.1 >= candidate.1 => Some(current),
                    _ => Some(candidate),
                });
            let entry = match observed {
                Some((hour, mean)) => DayBreakdown {
                    hour,
                    engagement_score: clamp_score(mean),
                },
                None => static_breakdown(heuristic, *day),
            };
            (*day, entry)
        })
        .collect();

    PlatformBestTime {
        platform: platform.to_string(),
        recommended_day,
        recommended_hour,
        engagement_score: clamp_score(day_mean),
        confidence: Confidence::High,
        posts_analyzed: observations.len(),
        daily_breakdown,
    }
}

fn fallback(
    platform: &str,
    heuristic: &PlatformHeuristic,
    posts_analyzed: usize,
    confidence: Confidence,
    jitter: f64,
) -> PlatformBestTime {
    let peak = heuristic.peak();
    PlatformBestTime {
        platform: platform.to_string(),
        recommended_day: heuristic.peak_day,
        recommended_hour: peak.hour,
        engagement_score: clamp_score(peak.engagement + jitter),
        confidence,
        posts_analyzed,
        daily_breakdown: DayOfWeek::ALL
            .iter()
            .map(|day| (*day, static_breakdown(heuristic, *day)))
            .collect(),
    }
}

fn static_breakdown(heuristic: &PlatformHeuristic, day: DayOfWeek) -> DayBreakdown {
    let slot = heuristic.day(day);
    DayBreakdown {
        hour: slot.hour,
        engagement_score: clamp_score(slot.engagement),
    }
}

/// Highest mean wins; ties keep the earliest key.
fn best_of<K: Copy>(means: &BTreeMap<K, Mean>) -> Option<(K, f64)> {
    means.iter().fold(None, |best, (key, mean)| {
        let value = mean.value();
        match best {
            Some((_, current)) if current >= value => best,
            _ => Some((*key, value)),
        }
    })
}
