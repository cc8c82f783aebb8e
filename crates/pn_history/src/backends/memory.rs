use async_trait::async_trait;
use chrono::Utc;
use pn_core::Result;
use tokio::sync::RwLock;

use crate::documents::{ArticleHistory, PublishedHistory};
use crate::HistoryStore;

/// In-memory history store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<ArticleHistory>,
    published: RwLock<PublishedHistory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn load_articles(&self) -> ArticleHistory {
        self.articles.read().await.clone()
    }

    async fn load_published(&self) -> PublishedHistory {
        self.published.read().await.clone()
    }

    async fn save_articles(&self, history: &mut ArticleHistory) -> Result<()> {
        history.last_updated = Utc::now().max(history.last_updated);
        *self.articles.write().await = history.clone();
        Ok(())
    }

    async fn save_published(&self, history: &mut PublishedHistory) -> Result<()> {
        history.last_updated = Utc::now().max(history.last_updated);
        *self.published.write().await = history.clone();
        Ok(())
    }
}
