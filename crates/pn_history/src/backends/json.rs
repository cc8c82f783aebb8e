use async_trait::async_trait;
use chrono::Utc;
use pn_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::documents::{ArticleHistory, PublishedHistory};
use crate::HistoryStore;

pub const ARTICLE_HISTORY_FILE: &str = "processed_articles_history.json";
pub const PUBLISHED_POSTS_FILE: &str = "published_posts_history.json";

/// File-backed history store: two independent JSON documents in one
/// directory. Saves go through a temp file and a rename so a crashed run
/// never leaves a half-written document behind.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn article_history_path(&self) -> PathBuf {
        self.dir.join(ARTICLE_HISTORY_FILE)
    }

    pub fn published_posts_path(&self) -> PathBuf {
        self.dir.join(PUBLISHED_POSTS_FILE)
    }

    fn load_document<T: DeserializeOwned + Default>(path: &Path) -> T {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                warn!(
                    "📭 No history found at {}, starting with a fresh one",
                    path.display()
                );
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    "📭 History at {} is unreadable ({}), starting with a fresh one",
                    path.display(),
                    e
                );
                T::default()
            }
        }
    }

    fn save_document<T: Serialize>(&self, path: &Path, document: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::History(format!("failed to create {}: {}", self.dir.display(), e)))?;

        let json = serde_json::to_string_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| Error::History(format!("failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| Error::History(format!("failed to replace {}: {}", path.display(), e)))?;

        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonStore {
    async fn load_articles(&self) -> ArticleHistory {
        Self::load_document(&self.article_history_path())
    }

    async fn load_published(&self) -> PublishedHistory {
        Self::load_document(&self.published_posts_path())
    }

    async fn save_articles(&self, history: &mut ArticleHistory) -> Result<()> {
        history.last_updated = Utc::now().max(history.last_updated);
        self.save_document(&self.article_history_path(), history)
    }

    async fn save_published(&self, history: &mut PublishedHistory) -> Result<()> {
        history.last_updated = Utc::now().max(history.last_updated);
        self.save_document(&self.published_posts_path(), history)
    }
}
