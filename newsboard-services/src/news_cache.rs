//! News Cache
//!
//! In-memory cache of the latest ranked news. Each successful refresh
//! publishes a new immutable snapshot; readers never see a mix of two
//! refreshes. A failed refresh leaves the previous snapshot in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{error, info, warn};

use newsboard_core::{NewsItem, NewsSnapshot};
use newsboard_feed::{KeywordOutcome, NewsFetcher};

/// What a call to [`NewsCache::refresh`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot was published
    Updated {
        item_count: usize,
        /// Keywords that failed but did not block the refresh
        failed_keywords: Vec<String>,
    },
    /// Every keyword failed, previous snapshot kept
    Failed { reason: String },
}

/// Cache health, exposed by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub last_updated: Option<DateTime<Utc>>,
    pub item_count: usize,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub last_failure: Option<String>,
    pub consecutive_failures: u32,
}

#[derive(Debug, Default)]
struct FailureState {
    last_failure_at: Option<DateTime<Utc>>,
    last_failure: Option<String>,
    consecutive_failures: u32,
}

/// Latest fetched news, shared between the refresh loop and request handlers
pub struct NewsCache {
    fetcher: NewsFetcher,
    max_items: usize,
    snapshot: RwLock<Arc<NewsSnapshot>>,
    /// Serializes refreshes so two runs cannot race on publication order
    refresh_lock: tokio::sync::Mutex<()>,
    failures: Mutex<FailureState>,
}

impl NewsCache {
    /// Create an empty cache; nothing is fetched until `refresh` runs
    pub fn new(fetcher: NewsFetcher, max_items: usize) -> Self {
        Self {
            fetcher,
            max_items,
            snapshot: RwLock::new(Arc::new(NewsSnapshot::default())),
            refresh_lock: tokio::sync::Mutex::new(()),
            failures: Mutex::new(FailureState::default()),
        }
    }

    /// Configured search keywords
    pub fn keywords(&self) -> &[String] {
        self.fetcher.keywords()
    }

    /// Fetch all keywords and publish the result
    ///
    /// Never fails: when every keyword fails the error is logged and the
    /// current snapshot stays untouched.
    pub async fn refresh(&self) -> RefreshOutcome {
        let _guard = self.refresh_lock.lock().await;
        info!("Updating cached news...");

        let report = self.fetcher.fetch_news(self.max_items).await;

        if report.all_failed() {
            let reason = report
                .outcomes
                .iter()
                .filter_map(|o| match o {
                    KeywordOutcome::Failed { keyword, error } => {
                        Some(format!("{}: {}", keyword, error))
                    }
                    KeywordOutcome::Fetched { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("; ");

            let mut failures = self.failures.lock();
            failures.last_failure_at = Some(Utc::now());
            failures.last_failure = Some(reason.clone());
            failures.consecutive_failures += 1;

            error!(
                "Failed to update news ({} consecutive): all {} keywords failed",
                failures.consecutive_failures,
                report.outcomes.len()
            );
            return RefreshOutcome::Failed { reason };
        }

        let failed_keywords: Vec<String> =
            report.failed().map(|o| o.keyword().to_string()).collect();
        if !failed_keywords.is_empty() {
            warn!(
                "Cache updated without keywords: {}",
                failed_keywords.join(", ")
            );
        }

        let snapshot = Arc::new(NewsSnapshot {
            items: report.items,
            last_updated: Some(Utc::now()),
        });
        let item_count = snapshot.items.len();
        let updated_at = snapshot.last_updated;

        *self.snapshot.write() = snapshot;
        self.failures.lock().consecutive_failures = 0;

        info!(
            "Cache updated: {} items (at {})",
            item_count,
            updated_at.map(|t| t.to_rfc3339()).unwrap_or_default()
        );

        RefreshOutcome::Updated {
            item_count,
            failed_keywords,
        }
    }

    /// Current snapshot; items and timestamp come from the same refresh
    pub fn snapshot(&self) -> Arc<NewsSnapshot> {
        self.snapshot.read().clone()
    }

    /// Owned copy of the cached items
    pub fn get_items(&self) -> Vec<NewsItem> {
        self.snapshot().items.clone()
    }

    /// Time of the last successful refresh, `None` if there never was one
    pub fn get_last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot().last_updated
    }

    pub fn status(&self) -> CacheStatus {
        let snapshot = self.snapshot();
        let failures = self.failures.lock();

        CacheStatus {
            last_updated: snapshot.last_updated,
            item_count: snapshot.items.len(),
            last_failure_at: failures.last_failure_at,
            last_failure: failures.last_failure.clone(),
            consecutive_failures: failures.consecutive_failures,
        }
    }
}
