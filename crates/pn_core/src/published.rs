use crate::Result;
use async_trait::async_trait;

/// A read-only source of content that has already been published somewhere
/// the local history cannot see (e.g. the destination spreadsheet).
///
/// A failing fetch degrades the run rather than aborting it: callers catch
/// the error, log it and continue with local history only.
#[async_trait]
pub trait PublishedSource: Send + Sync {
    /// Returns the name of the source, for logging
    fn name(&self) -> &str;

    /// Fetch every already-published post content this source knows about
    async fn fetch_published_contents(&self) -> Result<Vec<String>>;
}

/// Source used when no external publication store is configured.
pub struct NullSource;

#[async_trait]
impl PublishedSource for NullSource {
    fn name(&self) -> &str {
        "none"
    }

    async fn fetch_published_contents(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
