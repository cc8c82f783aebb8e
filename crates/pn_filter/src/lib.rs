pub mod filter;
pub mod fingerprint;
pub mod normalize;
pub mod run;

pub use filter::{filter_articles, filter_posts, ArticleFilterOutcome, PostFilterOutcome};
pub use fingerprint::{content_hash, similarity};
pub use normalize::normalize_url;
pub use run::{run, RunOutcome, RunReport};
