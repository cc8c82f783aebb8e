pub const DEFAULT_RETENTION_DAYS: i64 = 30;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Run configuration for the duplicate filter.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// How many days of processed-URL history to keep.
    pub retention_days: i64,
    /// Jaccard similarity at or above which a post counts as already published.
    pub similarity_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}
