//! News data structures for keyword news aggregation

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Entry title (empty when the feed omits it)
    pub title: String,
    /// Article URL, unique within a result set
    pub link: String,
    /// Publication date, absent when the feed has no parseable date
    pub published_at: Option<DateTime<Utc>>,
    /// Publisher name (e.g. the `<source>` element Google News attaches)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Keyword whose feed first produced this link
    pub keyword: String,
}

impl NewsItem {
    /// Ordering used for ranking: newest first, undated entries last
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        match (self.published_at, other.published_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Immutable view of the cache produced by one refresh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsSnapshot {
    /// Ranked items, newest first
    pub items: Vec<NewsItem>,
    /// When the refresh that produced `items` completed
    pub last_updated: Option<DateTime<Utc>>,
}

impl NewsSnapshot {
    /// Whether any refresh has ever succeeded
    pub fn is_populated(&self) -> bool {
        self.last_updated.is_some()
    }
}

/// Display payload served by the JSON endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPage {
    /// Ranked items, newest first
    pub items: Vec<NewsItem>,
    /// Number of items in `items`
    pub item_count: usize,
    /// Last successful refresh, `None` when the cache was never populated
    pub last_updated: Option<DateTime<Utc>>,
    /// Configured search keywords
    pub keywords: Vec<String>,
}

impl NewsPage {
    pub fn from_snapshot(snapshot: &NewsSnapshot, keywords: &[String]) -> Self {
        Self {
            items: snapshot.items.clone(),
            item_count: snapshot.items.len(),
            last_updated: snapshot.last_updated,
            keywords: keywords.to_vec(),
        }
    }
}
