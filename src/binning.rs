use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{parse_timestamp, EngagementEvent, EngagementTotals, EventKind};

pub const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBin {
    pub label: String,
    pub like_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
}

/// Four aligned sequences, one entry per calendar day that saw at least one
/// event, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub like_counts: Vec<u64>,
    pub comment_counts: Vec<u64>,
    pub share_counts: Vec<u64>,
    pub skipped: usize,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn bins(&self) -> Vec<TimeBin> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| TimeBin {
                label: label.clone(),
                like_count: self.like_counts[idx],
                comment_count: self.comment_counts[idx],
                share_count: self.share_counts[idx],
            })
            .collect()
    }

    pub fn bin(&self, label: &str) -> Option<TimeBin> {
        self.bins().into_iter().find(|bin| bin.label == label)
    }

    pub fn totals(&self) -> EngagementTotals {
        EngagementTotals {
            likes: self.like_counts.iter().sum(),
            comments: self.comment_counts.iter().sum(),
            shares: self.share_counts.iter().sum(),
        }
    }
}

pub fn bin_events(events: &[EngagementEvent], offset: FixedOffset) -> TimeSeries {
    let mut buckets: BTreeMap<NaiveDate, [u64; 3]> = BTreeMap::new();
    let mut skipped = 0usize;

    for event in events {
        let Some(timestamp) = parse_timestamp(&event.timestamp, offset) else {
            skipped += 1;
            continue;
        };
        let counts = buckets.entry(timestamp.date_naive()).or_insert([0; 3]);
        let slot = match event.kind {
            EventKind::Like => 0,
            EventKind::Comment => 1,
            EventKind::Share => 2,
        };
        counts[slot] += 1;
    }

    let mut series = TimeSeries {
        skipped,
        ..TimeSeries::default()
    };
    for (day, counts) in buckets {
        series
            .labels
            .push(day.format(DAY_LABEL_FORMAT).to_string());
        series.like_counts.push(counts[0]);
        series.comment_counts.push(counts[1]);
        series.share_counts.push(counts[2]);
    }

    series
}
