//! Google News RSS client for keyword searches
//!
//! One RSS search request per keyword against a templated endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use newsboard_core::NewsItem;

use crate::config::NewsConfig;
use crate::error::FeedError;
use crate::fetcher::FeedSource;
use crate::parser::parse_feed;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; Newsboard/1.0)";

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
    url_template: String,
    timeout: Duration,
}

impl GoogleNewsClient {
    /// Create a client for a custom `{query}` endpoint template
    pub fn with_template(url_template: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            url_template: url_template.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &NewsConfig) -> Self {
        Self::with_template(&config.feed_url_template, config.fetch_timeout)
    }

    /// Search Google News for a keyword
    pub async fn search(&self, keyword: &str) -> Result<Vec<NewsItem>, FeedError> {
        let url = build_feed_url(&self.url_template, keyword);
        info!("Fetching RSS for keyword: {} -> {}", keyword, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(FeedError::ApiError {
                status: response.status().as_u16(),
                message: format!("Google News returned status {}", response.status()),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let items = parse_feed(&content[..], keyword)?;
        debug!("Google News returned {} items for '{}'", items.len(), keyword);

        Ok(items)
    }

    fn map_request_error(&self, e: reqwest::Error) -> FeedError {
        if e.is_timeout() {
            FeedError::Timeout(self.timeout.as_secs())
        } else {
            FeedError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl FeedSource for GoogleNewsClient {
    async fn fetch_entries(&self, keyword: &str) -> Result<Vec<NewsItem>, FeedError> {
        self.search(keyword).await
    }
}

/// Substitute a keyword into the `{query}` placeholder
///
/// Spaces become `+`; anything else outside the unreserved set is
/// percent-encoded.
pub fn build_feed_url(template: &str, keyword: &str) -> String {
    let query = keyword
        .split(' ')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("+");

    template.replace("{query}", &query)
}
