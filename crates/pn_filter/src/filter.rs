use chrono::{Duration, NaiveDate};
use pn_core::{Article, Post};
use pn_history::{ArticleHistory, PublishedHistory};
use std::collections::HashSet;
use tracing::debug;

use crate::fingerprint::{content_hash, similarity};
use crate::normalize::normalize_url;

#[derive(Debug, Default)]
pub struct ArticleFilterOutcome {
    pub articles: Vec<Article>,
    /// Articles dropped for having no link at all.
    pub invalid: usize,
    pub duplicates: usize,
}

#[derive(Debug, Default)]
pub struct PostFilterOutcome {
    pub posts: Vec<Post>,
    /// Posts dropped for having empty content.
    pub invalid: usize,
    pub duplicates: usize,
}

/// Keep the articles whose normalized link has not been seen before, in input
/// order, marking each survivor in the history as it is emitted. Two copies
/// of the same article in one batch therefore collapse to the first.
///
/// A survivor is recorded under its own publish date when that date is still
/// inside the retention window, otherwise under `today`, so pruning right
/// after a save never removes a URL recorded during the same run.
pub fn filter_articles(
    articles: Vec<Article>,
    history: &mut ArticleHistory,
    today: NaiveDate,
    retention_days: i64,
) -> ArticleFilterOutcome {
    let cutoff = today - Duration::days(retention_days);
    let mut outcome = ArticleFilterOutcome::default();

    for article in articles {
        if article.link.is_empty() {
            debug!("🫥 Dropping article without a link: {:?}", article.title);
            outcome.invalid += 1;
            continue;
        }

        let normalized = normalize_url(&article.link);
        if history.is_processed(&normalized) {
            debug!("⏭️ Already processed: {}", normalized);
            outcome.duplicates += 1;
            continue;
        }

        let mark_date = article.date.filter(|d| *d >= cutoff).unwrap_or(today);
        history.mark_processed(&normalized, mark_date);
        outcome.articles.push(article);
    }

    outcome
}

/// Keep the posts whose content is not a near-duplicate of anything already
/// published, in input order. The comparison corpus is the local history plus
/// whatever the external reader contributed; each accepted post joins the
/// corpus immediately, so later posts in the batch are measured against
/// earlier accepted ones too.
pub fn filter_posts(
    posts: Vec<Post>,
    history: &mut PublishedHistory,
    external_corpus: &[String],
    threshold: f64,
) -> PostFilterOutcome {
    let mut corpus: Vec<String> = history.published_posts.clone();
    corpus.extend(external_corpus.iter().cloned());
    let mut hashes: HashSet<String> = corpus.iter().map(|c| content_hash(c)).collect();

    let mut outcome = PostFilterOutcome::default();

    for post in posts {
        if post.content.is_empty() {
            debug!("🫥 Dropping {} post without content: {:?}", post.platform, post.title);
            outcome.invalid += 1;
            continue;
        }

        let hash = content_hash(&post.content);
        let duplicate = hashes.contains(&hash)
            || corpus.iter().any(|published| {
                let score = similarity(&post.content, published);
                if score >= threshold {
                    debug!("⏭️ {} post scores {:.2} against published content", post.platform, score);
                    true
                } else {
                    false
                }
            });

        if duplicate {
            outcome.duplicates += 1;
            continue;
        }

        history.record(&post.content);
        hashes.insert(hash);
        corpus.push(post.content.clone());
        outcome.posts.push(post);
    }

    outcome
}
