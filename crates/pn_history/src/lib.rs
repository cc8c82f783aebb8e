use async_trait::async_trait;
use pn_core::Result;

pub mod backends;
pub mod documents;

pub use backends::{JsonStore, MemoryStore};
pub use documents::{ArticleHistory, PublishedHistory};

/// Persistence boundary for the two history documents.
///
/// Loads never fail: a missing or corrupt document comes back as a fresh
/// empty one. Saves are the single fatal error class of a run — losing
/// history means reprocessing and republishing everything next time.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load_articles(&self) -> ArticleHistory;

    async fn load_published(&self) -> PublishedHistory;

    /// Persist the article history, bumping `last_updated`.
    async fn save_articles(&self, history: &mut ArticleHistory) -> Result<()>;

    /// Persist the published-post history, bumping `last_updated`.
    async fn save_published(&self, history: &mut PublishedHistory) -> Result<()>;
}
