use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::best_time::PlatformBestTime;
use crate::recommendations::{Recommendation, RecommendationStatus};
use crate::EngagementReport;

const MAX_SUMMARIES: usize = 50;

static SUMMARY_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSummary {
    pub id: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_score: Option<u8>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub best_times: BTreeMap<String, PlatformBestTime>,
}

impl StoredSummary {
    pub fn new(
        report: Option<&EngagementReport>,
        best_times: BTreeMap<String, PlatformBestTime>,
        now: DateTime<Utc>,
    ) -> Self {
        let counter = SUMMARY_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("sum-{}-{}", now.timestamp_millis(), counter),
            created_at: now.to_rfc3339(),
            composite_score: report.map(|report| report.composite_score),
            recommendations: report
                .map(|report| report.recommendations.clone())
                .unwrap_or_default(),
            best_times,
        }
    }
}

/// JSON file sink for computed summaries, newest first.
pub struct SummaryStore {
    path: PathBuf,
    summaries: Mutex<Vec<StoredSummary>>,
}

impl SummaryStore {
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let summaries = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read summaries: {}", err))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| format!("failed to parse summaries: {}", err))?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            summaries: Mutex::new(summaries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Vec<StoredSummary> {
        let guard = self.summaries.lock().await;
        guard.clone()
    }

    pub async fn get(&self, summary_id: &str) -> Option<StoredSummary> {
        let guard = self.summaries.lock().await;
        guard.iter().find(|summary| summary.id == summary_id).cloned()
    }

    /// Prepends `summary`, keeping at most the newest 50. The in-memory list
    /// only changes once the file write succeeds.
    pub async fn add(&self, summary: StoredSummary) -> Result<StoredSummary, String> {
        let mut guard = self.summaries.lock().await;
        let next: Vec<StoredSummary> = std::iter::once(summary.clone())
            .chain(guard.iter().cloned())
            .take(MAX_SUMMARIES)
            .collect();
        self.commit(&mut guard, next).await?;
        Ok(summary)
    }

    pub async fn set_recommendation_status(
        &self,
        summary_id: &str,
        index: usize,
        status: RecommendationStatus,
    ) -> Result<StoredSummary, String> {
        let mut guard = self.summaries.lock().await;
        let position = guard
            .iter()
            .position(|summary| summary.id == summary_id)
            .ok_or_else(|| format!("summary not found: {}", summary_id))?;
        let mut updated = guard[position].clone();
        let recommendation = updated
            .recommendations
            .get(index)
            .cloned()
            .ok_or_else(|| format!("recommendation index out of range: {}", index))?;
        updated.recommendations[index] = recommendation.with_status(status);

        let mut next = guard.clone();
        next[position] = updated.clone();
        self.commit(&mut guard, next).await?;
        Ok(updated)
    }

    pub async fn delete(&self, summary_id: &str) -> Result<bool, String> {
        let mut guard = self.summaries.lock().await;
        let next: Vec<StoredSummary> = guard
            .iter()
            .filter(|summary| summary.id != summary_id)
            .cloned()
            .collect();
        if next.len() == guard.len() {
            return Ok(false);
        }
        self.commit(&mut guard, next).await?;
        Ok(true)
    }

    async fn commit(
        &self,
        current: &mut Vec<StoredSummary>,
        next: Vec<StoredSummary>,
    ) -> Result<(), String> {
        self.persist(&next).await?;
        *current = next;
        Ok(())
    }

    async fn persist(&self, summaries: &[StoredSummary]) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(summaries)
            .map_err(|err| format!("failed to serialize summaries: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write summaries: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize summaries: {}", err))?;
        Ok(())
    }
}

/// Stores `summary` and turns any failure into a warning. The computed
/// result stays valid either way.
pub async fn save_summary(
    store: &SummaryStore,
    summary: StoredSummary,
    warnings: &mut Vec<String>,
) -> Option<String> {
    match store.add(summary).await {
        Ok(saved) => Some(saved.id),
        Err(err) => {
            tracing::warn!(path = %store.path().display(), error = %err, "failed to persist summary");
            warnings.push(format!("summary not saved: {}", err));
            None
        }
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create summary dir: {}", err))
}
