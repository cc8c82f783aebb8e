use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate article handed over by the feed-acquisition side.
///
/// Identity for deduplication purposes is the normalized `link`; an article
/// without a link cannot be tracked and is dropped during filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub summary: String,
}

/// A generated social-media post awaiting publication.
///
/// Field names follow the exchange format of the content generator
/// (Date / Platform / Title / Content columns).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub platform: Platform,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    Instagram,
    Twitter,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::LinkedIn => write!(f, "LinkedIn"),
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Twitter => write!(f, "Twitter"),
        }
    }
}
