pub mod calculator;
pub mod heuristics;

use std::collections::BTreeSet;

use crate::{normalize_platform, HistoricalPost};

pub use calculator::{
    BestTimeCalculator, BestTimeConfig, Confidence, DayBreakdown, Observation, PlatformBestTime,
};
pub use heuristics::{for_platform, DaySlot, PlatformHeuristic};

/// Sorted, de-duplicated union of `defaults` and every platform a post
/// targets.
pub fn platforms_for(posts: &[HistoricalPost], defaults: &[String]) -> Vec<String> {
    let mut platforms: BTreeSet<String> = defaults
        .iter()
        .map(|platform| normalize_platform(platform))
        .collect();
    for post in posts {
        platforms.extend(post.platforms.iter().map(|platform| normalize_platform(platform)));
    }
    platforms.retain(|platform| !platform.is_empty());
    platforms.into_iter().collect()
}
