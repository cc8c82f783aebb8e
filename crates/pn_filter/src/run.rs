use chrono::Utc;
use pn_core::{Article, Post, PublishedSource, Result, TrackerConfig};
use pn_history::HistoryStore;
use tracing::{info, warn};

use crate::filter::{filter_articles, filter_posts};

#[derive(Debug, Default)]
pub struct RunReport {
    pub articles_in: usize,
    pub articles_out: usize,
    pub articles_invalid: usize,
    pub posts_in: usize,
    pub posts_out: usize,
    pub posts_invalid: usize,
    /// True when the external publication reader failed and post filtering
    /// fell back to local history only.
    pub degraded: bool,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub articles: Vec<Article>,
    pub posts: Vec<Post>,
    pub report: RunReport,
}

/// One full tracking run: load history, prune the URL window, filter
/// articles by identity, filter posts by similarity, save history.
///
/// Every stage runs even when the external corpus fetch fails; the only
/// error that aborts the run is a failed history save, since losing history
/// means duplicate publication on every following run.
pub async fn run(
    store: &dyn HistoryStore,
    source: &dyn PublishedSource,
    config: &TrackerConfig,
    articles: Vec<Article>,
    posts: Vec<Post>,
) -> Result<RunOutcome> {
    let today = Utc::now().date_naive();
    let mut report = RunReport {
        articles_in: articles.len(),
        posts_in: posts.len(),
        ..RunReport::default()
    };

    let mut article_history = store.load_articles().await;
    let mut published_history = store.load_published().await;

    article_history.prune(config.retention_days, today);
    info!(
        "🗂️ History loaded: {} tracked URLs, {} published posts",
        article_history.url_count(),
        published_history.published_posts.len()
    );

    let article_outcome = filter_articles(articles, &mut article_history, today, config.retention_days);
    report.articles_out = article_outcome.articles.len();
    report.articles_invalid = article_outcome.invalid;
    info!(
        "📰 Filtered {} articles to {} new ({} without links)",
        report.articles_in, report.articles_out, report.articles_invalid
    );

    let external_corpus = match source.fetch_published_contents().await {
        Ok(contents) => {
            info!("📋 Fetched {} published posts from {}", contents.len(), source.name());
            contents
        }
        Err(e) => {
            warn!(
                "⚠️ Could not fetch published posts from {}: {}. Continuing with local history only.",
                source.name(),
                e
            );
            report.degraded = true;
            Vec::new()
        }
    };

    let post_outcome = filter_posts(
        posts,
        &mut published_history,
        &external_corpus,
        config.similarity_threshold,
    );
    report.posts_out = post_outcome.posts.len();
    report.posts_invalid = post_outcome.invalid;
    info!(
        "✉️ Filtered {} posts to {} new ({} without content)",
        report.posts_in, report.posts_out, report.posts_invalid
    );

    // Article history first: if the second save fails the run aborts, but
    // article-level progress is already on disk.
    store.save_articles(&mut article_history).await?;
    store.save_published(&mut published_history).await?;
    info!("💾 History saved");

    Ok(RunOutcome {
        articles: article_outcome.articles,
        posts: post_outcome.posts,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pn_core::{NullSource, Platform};
    use pn_history::MemoryStore;

    struct FailingSource;

    #[async_trait]
    impl PublishedSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_published_contents(&self) -> Result<Vec<String>> {
            Err(anyhow::anyhow!("credentials missing").into())
        }
    }

    struct SheetStub(Vec<String>);

    #[async_trait]
    impl PublishedSource for SheetStub {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_published_contents(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn article(link: &str) -> Article {
        Article {
            title: format!("Article at {}", link),
            link: link.to_string(),
            date: None,
            source: "test".to_string(),
            summary: String::new(),
        }
    }

    fn post(content: &str) -> Post {
        Post {
            date: None,
            platform: Platform::Twitter,
            title: "Test post".to_string(),
            content: content.to_string(),
            article_link: None,
        }
    }

    #[tokio::test]
    async fn test_full_run_on_empty_history() {
        let store = MemoryStore::new();
        let config = TrackerConfig::default();
        let batch = vec![
            article("http://example.com/a"),
            article("http://example.com/b"),
            article("http://example.com/a"),
        ];

        let outcome = run(&store, &NullSource, &config, batch, vec![post("First ever post")])
            .await
            .unwrap();

        let links: Vec<_> = outcome.articles.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(links, vec!["http://example.com/a", "http://example.com/b"]);
        assert_eq!(outcome.posts.len(), 1);
        assert!(!outcome.report.degraded);

        let today = Utc::now().date_naive();
        let saved = store.load_articles().await;
        assert_eq!(saved.processed_dates.get(&today).map(Vec::len), Some(2));
        assert!(store.load_published().await.contains("First ever post"));
    }

    #[tokio::test]
    async fn test_second_run_filters_everything_out() {
        let store = MemoryStore::new();
        let config = TrackerConfig::default();
        let batch = vec![article("http://example.com/a"), article("http://example.com/b")];

        run(&store, &NullSource, &config, batch.clone(), vec![post("A post")])
            .await
            .unwrap();
        let outcome = run(&store, &NullSource, &config, batch, vec![post("A post")])
            .await
            .unwrap();

        assert!(outcome.articles.is_empty());
        assert!(outcome.posts.is_empty());
    }

    #[tokio::test]
    async fn test_failing_source_degrades_but_run_completes() {
        let store = MemoryStore::new();
        let config = TrackerConfig::default();

        let outcome = run(
            &store,
            &FailingSource,
            &config,
            vec![article("http://example.com/a")],
            vec![post("A post written while the sheet was down")],
        )
        .await
        .unwrap();

        assert!(outcome.report.degraded);
        assert_eq!(outcome.articles.len(), 1);
        assert_eq!(outcome.posts.len(), 1);
        // Local history still persisted
        assert!(store
            .load_published()
            .await
            .contains("A post written while the sheet was down"));
    }

    #[tokio::test]
    async fn test_external_corpus_feeds_the_post_filter() {
        let store = MemoryStore::new();
        let config = TrackerConfig::default();
        let sheet = SheetStub(vec!["Housing prices rise in London this quarter".to_string()]);

        let outcome = run(
            &store,
            &sheet,
            &config,
            Vec::new(),
            vec![post("Housing prices rise in London this quarter!!")],
        )
        .await
        .unwrap();

        assert!(outcome.posts.is_empty());
    }
}
