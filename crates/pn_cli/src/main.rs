use clap::Parser;
use pn_core::config::{DEFAULT_RETENTION_DAYS, DEFAULT_SIMILARITY_THRESHOLD};
use pn_core::{Article, NullSource, Post, PublishedSource, Result, TrackerConfig};
use pn_filter::run::run;
use pn_history::JsonStore;
use pn_sheets::SheetSource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Property-news duplicate filter and publication tracker", long_about = None)]
struct Cli {
    /// Directory holding the two history documents. Assumes exclusive
    /// access for the duration of a run; overlapping scheduled invocations
    /// need external locking.
    #[arg(long, default_value = "articles")]
    history_dir: PathBuf,
    /// Days of processed-URL history to keep
    #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
    retention_days: i64,
    /// Similarity at or above which a post counts as already published
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    similarity_threshold: f64,
    /// Spreadsheet with already-published posts (or GOOGLE_SHEET_ID)
    #[arg(long)]
    sheet_id: Option<String>,
    /// API key for reading the spreadsheet (or GOOGLE_API_KEY)
    #[arg(long)]
    sheet_api_key: Option<String>,
    #[arg(long, default_value = "Sheet1")]
    sheet_range: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Filter candidate articles and posts in one run
    Run {
        /// JSON file of candidate articles
        #[arg(long)]
        articles: PathBuf,
        /// JSON file of candidate posts
        #[arg(long)]
        posts: Option<PathBuf>,
        /// Where to write surviving articles (defaults to overwriting the input)
        #[arg(long)]
        out_articles: Option<PathBuf>,
        /// Where to write surviving posts (defaults to overwriting the input)
        #[arg(long)]
        out_posts: Option<PathBuf>,
    },
    /// Filter only candidate articles by URL identity
    Articles {
        path: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Filter only candidate posts by content similarity
    Posts {
        path: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Read a JSON array of candidate records, skipping malformed entries so one
/// bad record never takes the batch down with it.
fn read_candidates<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let mut items = Vec::new();
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(item) => items.push(item),
            Err(e) => warn!("🫥 Skipping malformed record {} in {}: {}", i, path.display(), e),
        }
    }
    Ok(items)
}

fn write_filtered<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = JsonStore::new(&cli.history_dir);
    let config = TrackerConfig {
        retention_days: cli.retention_days,
        similarity_threshold: cli.similarity_threshold,
    };

    let sheet_id = cli.sheet_id.or_else(|| std::env::var("GOOGLE_SHEET_ID").ok());
    let api_key = cli.sheet_api_key.or_else(|| std::env::var("GOOGLE_API_KEY").ok());
    let source: Box<dyn PublishedSource> = match (sheet_id, api_key) {
        (Some(sheet_id), Some(api_key)) => {
            Box::new(SheetSource::new(sheet_id, api_key, cli.sheet_range))
        }
        _ => {
            info!("📋 No sheet configured, using local history only");
            Box::new(NullSource)
        }
    };

    let (articles_path, posts_path, out_articles, out_posts) = match cli.command {
        Commands::Run { articles, posts, out_articles, out_posts } => {
            (Some(articles), posts, out_articles, out_posts)
        }
        Commands::Articles { path, out } => (Some(path), None, out, None),
        Commands::Posts { path, out } => (None, Some(path), None, out),
    };

    let articles: Vec<Article> = match &articles_path {
        Some(path) => read_candidates(path)?,
        None => Vec::new(),
    };
    let posts: Vec<Post> = match &posts_path {
        Some(path) => read_candidates(path)?,
        None => Vec::new(),
    };

    let outcome = run(&store, source.as_ref(), &config, articles, posts).await?;

    if let Some(path) = out_articles.or(articles_path) {
        write_filtered(&path, &outcome.articles)?;
        info!("📰 Wrote {} new articles to {}", outcome.articles.len(), path.display());
    }
    if let Some(path) = out_posts.or(posts_path) {
        write_filtered(&path, &outcome.posts)?;
        info!("✉️ Wrote {} new posts to {}", outcome.posts.len(), path.display());
    }

    if outcome.report.degraded {
        warn!("⚠️ Run completed in degraded mode (published-post corpus unavailable)");
    }
    info!(
        "✅ Run complete: {}/{} articles new, {}/{} posts new",
        outcome.report.articles_out,
        outcome.report.articles_in,
        outcome.report.posts_out,
        outcome.report.posts_in
    );

    Ok(())
}
