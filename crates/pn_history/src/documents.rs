use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rolling record of article URLs already processed, keyed by the date they
/// were first seen. Date keys serialize as `YYYY-MM-DD`.
///
/// Older documents carried extra fields (a flat `processed_urls` array);
/// unknown fields are ignored on load so those files still read cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleHistory {
    #[serde(default)]
    pub processed_dates: BTreeMap<NaiveDate, Vec<String>>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Default for ArticleHistory {
    fn default() -> Self {
        Self {
            processed_dates: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }
}

impl ArticleHistory {
    /// True if the normalized URL was recorded under any date.
    pub fn is_processed(&self, normalized_url: &str) -> bool {
        self.processed_dates
            .values()
            .any(|urls| urls.iter().any(|u| u == normalized_url))
    }

    /// Record a normalized URL under `date`. No-op when the URL is already
    /// known, so a URL lives under exactly one date key.
    pub fn mark_processed(&mut self, normalized_url: &str, date: NaiveDate) {
        if self.is_processed(normalized_url) {
            return;
        }
        self.processed_dates
            .entry(date)
            .or_default()
            .push(normalized_url.to_string());
    }

    /// Drop every date key strictly older than `today - retention_days`.
    pub fn prune(&mut self, retention_days: i64, today: NaiveDate) {
        let cutoff = today - Duration::days(retention_days);
        self.processed_dates.retain(|date, _| *date >= cutoff);
    }

    pub fn url_count(&self) -> usize {
        self.processed_dates.values().map(Vec::len).sum()
    }
}

/// Every post content ever accepted for publication. Unlike the URL history
/// this corpus is never pruned; see DESIGN.md for the rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedHistory {
    #[serde(default)]
    pub published_posts: Vec<String>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Default for PublishedHistory {
    fn default() -> Self {
        Self {
            published_posts: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl PublishedHistory {
    pub fn contains(&self, content: &str) -> bool {
        self.published_posts.iter().any(|p| p == content)
    }

    /// Append `content` unless it is already recorded. Returns whether the
    /// corpus grew.
    pub fn record(&mut self, content: &str) -> bool {
        if self.contains(content) {
            return false;
        }
        self.published_posts.push(content.to_string());
        true
    }
}
