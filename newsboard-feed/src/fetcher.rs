//! Keyword fetch pipeline
//!
//! Fetches every configured keyword in order, deduplicates entries by link
//! across keywords, ranks newest first and truncates. A failing keyword is
//! recorded and skipped; it never aborts the batch.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use newsboard_core::NewsItem;

use crate::config::NewsConfig;
use crate::error::FeedError;

/// Where a keyword's entries come from
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed for one keyword
    async fn fetch_entries(&self, keyword: &str) -> Result<Vec<NewsItem>, FeedError>;
}

/// Result of fetching a single keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordOutcome {
    Fetched {
        keyword: String,
        /// Entries in the parsed feed
        entries: usize,
        /// Entries kept after cross-keyword dedup
        added: usize,
    },
    Failed {
        keyword: String,
        error: FeedError,
    },
}

impl KeywordOutcome {
    pub fn keyword(&self) -> &str {
        match self {
            KeywordOutcome::Fetched { keyword, .. } | KeywordOutcome::Failed { keyword, .. } => {
                keyword
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, KeywordOutcome::Failed { .. })
    }
}

/// Ranked items plus what happened to each keyword
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub items: Vec<NewsItem>,
    pub outcomes: Vec<KeywordOutcome>,
}

impl FetchReport {
    /// True when at least one keyword was attempted and every one failed
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(KeywordOutcome::is_failed)
    }

    /// Keywords whose fetch failed
    pub fn failed(&self) -> impl Iterator<Item = &KeywordOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }
}

/// Fetches, deduplicates and ranks news for a fixed keyword list
pub struct NewsFetcher {
    source: Arc<dyn FeedSource>,
    keywords: Vec<String>,
    keyword_delay: Duration,
}

impl NewsFetcher {
    pub fn new(source: Arc<dyn FeedSource>, keywords: Vec<String>, keyword_delay: Duration) -> Self {
        Self {
            source,
            keywords,
            keyword_delay,
        }
    }

    pub fn from_config(source: Arc<dyn FeedSource>, config: &NewsConfig) -> Self {
        Self::new(source, config.keywords.clone(), config.keyword_delay)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Fetch all keywords and return at most `limit` ranked items
    pub async fn fetch_news(&self, limit: usize) -> FetchReport {
        let mut items = Vec::new();
        let mut outcomes = Vec::with_capacity(self.keywords.len());
        let mut seen_links = HashSet::new();

        for keyword in &self.keywords {
            match self.source.fetch_entries(keyword).await {
                Ok(entries) => {
                    let entry_count = entries.len();
                    let before = items.len();

                    for entry in entries {
                        // First occurrence wins, across all keywords
                        if seen_links.insert(entry.link.clone()) {
                            items.push(entry);
                        }
                    }

                    let added = items.len() - before;
                    debug!(
                        "Keyword '{}': {} entries, {} new",
                        keyword, entry_count, added
                    );
                    outcomes.push(KeywordOutcome::Fetched {
                        keyword: keyword.clone(),
                        entries: entry_count,
                        added,
                    });
                }
                Err(e) => {
                    warn!("Failed to fetch feed for keyword '{}': {}", keyword, e);
                    outcomes.push(KeywordOutcome::Failed {
                        keyword: keyword.clone(),
                        error: e,
                    });
                }
            }

            if !self.keyword_delay.is_zero() {
                tokio::time::sleep(self.keyword_delay).await;
            }
        }

        // Stable sort keeps fetch order among equal timestamps
        items.sort_by(NewsItem::cmp_newest_first);
        items.truncate(limit);

        let report = FetchReport { items, outcomes };
        info!(
            "Fetched {} items from {} keywords ({} failed)",
            report.items.len(),
            report.outcomes.len(),
            report.failed().count()
        );
        report
    }
}
