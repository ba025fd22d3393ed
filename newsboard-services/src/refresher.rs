//! Periodic cache refresh
//!
//! Background task that refreshes the news cache on a fixed interval,
//! starting with an immediate refresh at startup.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::news_cache::{NewsCache, RefreshOutcome};

/// Spawn the refresh loop; abort the handle to stop it
pub fn spawn_refresh_loop(cache: Arc<NewsCache>, every: Duration) -> JoinHandle<()> {
    info!("Starting news refresh loop every {}s", every.as_secs());

    tokio::spawn(async move {
        let mut ticker = interval(every);
        // A slow refresh should not be followed by a burst of catch-up runs
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match cache.refresh().await {
                RefreshOutcome::Updated { item_count, .. } => {
                    debug!("Scheduled refresh stored {} items", item_count);
                }
                RefreshOutcome::Failed { .. } => {
                    debug!("Scheduled refresh failed, serving stale data");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use newsboard_core::NewsItem;
    use newsboard_feed::{FeedError, FeedSource, NewsFetcher};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedSource for CountingSource {
        async fn fetch_entries(&self, keyword: &str) -> Result<Vec<NewsItem>, FeedError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![NewsItem {
                title: keyword.to_string(),
                link: format!("https://news.example.com/{}", n),
                published_at: None,
                source: None,
                keyword: keyword.to_string(),
            }])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_immediately_then_on_interval() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let fetcher = NewsFetcher::new(source.clone(), vec!["A".to_string()], Duration::ZERO);
        let cache = Arc::new(NewsCache::new(fetcher, 20));

        let handle = spawn_refresh_loop(Arc::clone(&cache), Duration::from_secs(600));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(cache.get_last_updated().is_some());

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        handle.abort();
    }
}
