use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::best_time::BestTimeConfig;
use crate::recommendations::RecommendationConfig;
use crate::scoring::CompositeConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub trending_limit: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self { trending_limit: 6 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Fixed offset applied before computing day labels, weekdays and hours.
    pub utc_offset_minutes: i32,
}

impl TimeConfig {
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub stale_after_days: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { stale_after_days: 7 }
    }
}

impl CacheConfig {
    /// Upper bound on the staleness window, in days.
    pub const MAX_STALE_AFTER_DAYS: i64 = 36_500;

    pub fn stale_after(&self) -> Duration {
        Duration::days(self.stale_after_days.clamp(0, Self::MAX_STALE_AFTER_DAYS))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub composite: CompositeConfig,
    pub recommendations: RecommendationConfig,
    pub sentiment: SentimentConfig,
    pub best_time: BestTimeConfig,
    pub time: TimeConfig,
    pub cache: CacheConfig,
    pub store: StoreConfig,
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(limit) = env::var("ENGINE_TRENDING_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.sentiment.trending_limit = value;
            }
        }
        if let Ok(min_posts) = env::var("ENGINE_MIN_POSTS") {
            if let Ok(value) = min_posts.parse::<usize>() {
                self.best_time.min_posts_for_high_confidence = value;
            }
        }
        if let Ok(jitter) = env::var("ENGINE_JITTER") {
            if let Ok(value) = jitter.parse::<f64>() {
                self.best_time.fallback_jitter = value;
            }
        }
        if let Ok(seed) = env::var("ENGINE_JITTER_SEED") {
            if let Ok(value) = seed.parse::<u64>() {
                self.best_time.jitter_seed = value;
            }
        }
        if let Ok(offset) = env::var("ENGINE_UTC_OFFSET_MINUTES") {
            if let Ok(value) = offset.parse::<i32>() {
                self.time.utc_offset_minutes = value;
            }
        }
        if let Ok(days) = env::var("ENGINE_STALE_DAYS") {
            if let Ok(value) = days.parse::<i64>() {
                self.cache.stale_after_days = value;
            }
        }
        if let Ok(path) = env::var("ENGINE_STORE_PATH") {
            if !path.trim().is_empty() {
                self.store.path = Some(path);
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ENGINE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engine.toml")))
}
