use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

use crate::best_time::PlatformBestTime;
use crate::config::{CacheConfig, EngineConfig};
use crate::{analyze_engagement, best_posting_times, EngagementEvent, EngagementReport, HistoricalPost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
    Stale,
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    computed_at: DateTime<Utc>,
    value: T,
}

/// Memoizes engine results per input snapshot. Entries are keyed by a
/// SHA-256 of the canonical JSON of the inputs plus the config, and expire
/// once older than the configured staleness window.
#[derive(Debug)]
pub struct InsightsCache {
    stale_after: Duration,
    reports: HashMap<String, CacheEntry<EngagementReport>>,
    best_times: HashMap<String, CacheEntry<BTreeMap<String, PlatformBestTime>>>,
}

impl InsightsCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            stale_after: config.stale_after(),
            reports: HashMap::new(),
            best_times: HashMap::new(),
        }
    }

    pub fn is_stale(&self, computed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - computed_at > self.stale_after
    }

    pub fn len(&self) -> usize {
        self.reports.len() + self.best_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn engagement_report(
        &mut self,
        events: &[EngagementEvent],
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> (EngagementReport, CacheStatus) {
        let key = snapshot_key(&(events, config));
        let stale_after = self.stale_after;
        lookup_or_compute(&mut self.reports, key, now, stale_after, || {
            analyze_engagement(events, config)
        })
    }

    pub fn best_times(
        &mut self,
        posts: &[HistoricalPost],
        platforms: &[String],
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> (BTreeMap<String, PlatformBestTime>, CacheStatus) {
        let key = snapshot_key(&(posts, platforms, config));
        let stale_after = self.stale_after;
        lookup_or_compute(&mut self.best_times, key, now, stale_after, || {
            best_posting_times(posts, platforms, config)
        })
    }

    pub fn purge_stale(&mut self, now: DateTime<Utc>) -> usize {
        let stale_after = self.stale_after;
        let before = self.len();
        self.reports
            .retain(|_, entry| now - entry.computed_at <= stale_after);
        self.best_times
            .retain(|_, entry| now - entry.computed_at <= stale_after);
        before - self.len()
    }
}

fn lookup_or_compute<T: Clone>(
    entries: &mut HashMap<String, CacheEntry<T>>,
    key: String,
    now: DateTime<Utc>,
    stale_after: Duration,
    compute: impl FnOnce() -> T,
) -> (T, CacheStatus) {
    let status = match entries.get(&key) {
        Some(entry) if now - entry.computed_at <= stale_after => {
            tracing::debug!(key = %key, "cache hit");
            return (entry.value.clone(), CacheStatus::Hit);
        }
        Some(_) => CacheStatus::Stale,
        None => CacheStatus::Miss,
    };

    tracing::debug!(key = %key, status = ?status, "recomputing snapshot");
    let value = compute();
    entries.insert(
        key,
        CacheEntry {
            computed_at: now,
            value: value.clone(),
        },
    );
    (value, status)
}

/// Hex SHA-256 of the value's JSON encoding.
pub fn snapshot_key<T: Serialize + ?Sized>(value: &T) -> String {
    let payload = serde_json::to_vec(value).unwrap_or_default();
    let digest = Sha256::digest(&payload);
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}
