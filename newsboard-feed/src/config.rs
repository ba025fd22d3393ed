//! News board configuration

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Google News RSS search endpoint, Japanese edition
pub const DEFAULT_FEED_URL: &str =
    "https://news.google.com/rss/search?q={query}&hl=ja&gl=JP&ceid=JP:ja";

/// Default search keywords (voice actors)
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "石見舞菜香",
    "岡崎美保",
    "長谷川育美",
    "東山奈央",
    "青山吉能",
    "鬼頭明里",
    "高橋李依",
    "赤尾ひかる",
];

const DEFAULT_MAX_ITEMS: usize = 20;
const DEFAULT_KEYWORD_DELAY_MS: u64 = 200;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;

/// Static configuration for fetching and caching news
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    /// Search keywords, fetched in this order
    pub keywords: Vec<String>,
    /// Maximum number of items kept in the cache
    pub max_items: usize,
    /// Feed endpoint with a `{query}` placeholder
    pub feed_url_template: String,
    /// Pause after each keyword's request
    pub keyword_delay: Duration,
    /// Upper bound for a single feed request
    pub fetch_timeout: Duration,
    /// How often the cache is refreshed
    pub refresh_interval: Duration,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_items: DEFAULT_MAX_ITEMS,
            feed_url_template: DEFAULT_FEED_URL.to_string(),
            keyword_delay: Duration::from_millis(DEFAULT_KEYWORD_DELAY_MS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        }
    }
}

impl NewsConfig {
    /// Load configuration from environment variables
    ///
    /// Reads (all optional):
    /// - NEWS_KEYWORDS: JSON array of keyword strings
    /// - NEWS_MAX_ITEMS
    /// - NEWS_FEED_URL: endpoint template containing `{query}`
    /// - NEWS_KEYWORD_DELAY_MS
    /// - NEWS_FETCH_TIMEOUT_SECS
    /// - NEWS_REFRESH_INTERVAL_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let keywords = match lookup("NEWS_KEYWORDS") {
            Some(json) => {
                let keywords: Vec<String> =
                    serde_json::from_str(&json).map_err(|e| ConfigError::InvalidJson {
                        field: "NEWS_KEYWORDS".to_string(),
                        error: e.to_string(),
                    })?;
                keywords
                    .into_iter()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            }
            None => defaults.keywords,
        };

        if keywords.is_empty() {
            return Err(ConfigError::EmptyKeywordList);
        }

        let max_items = parse_number(&lookup, "NEWS_MAX_ITEMS", DEFAULT_MAX_ITEMS as u64)? as usize;
        if max_items == 0 {
            return Err(ConfigError::InvalidValue {
                field: "NEWS_MAX_ITEMS".to_string(),
                value: "0".to_string(),
            });
        }

        let feed_url_template = lookup("NEWS_FEED_URL").unwrap_or(defaults.feed_url_template);
        validate_template(&feed_url_template)?;

        let keyword_delay = Duration::from_millis(parse_number(
            &lookup,
            "NEWS_KEYWORD_DELAY_MS",
            DEFAULT_KEYWORD_DELAY_MS,
        )?);

        let fetch_timeout = parse_number(
            &lookup,
            "NEWS_FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?;
        let refresh_interval = parse_number(
            &lookup,
            "NEWS_REFRESH_INTERVAL_SECS",
            DEFAULT_REFRESH_INTERVAL_SECS,
        )?;

        for (field, secs) in [
            ("NEWS_FETCH_TIMEOUT_SECS", fetch_timeout),
            ("NEWS_REFRESH_INTERVAL_SECS", refresh_interval),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: "0".to_string(),
                });
            }
        }

        Ok(Self {
            keywords,
            max_items,
            feed_url_template,
            keyword_delay,
            fetch_timeout: Duration::from_secs(fetch_timeout),
            refresh_interval: Duration::from_secs(refresh_interval),
        })
    }
}

fn parse_number<F>(lookup: &F, field: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(field) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn validate_template(template: &str) -> Result<(), ConfigError> {
    if !template.contains("{query}") {
        return Err(ConfigError::MissingQueryPlaceholder(template.to_string()));
    }

    url::Url::parse(&template.replace("{query}", "keyword")).map_err(|e| {
        ConfigError::InvalidValue {
            field: "NEWS_FEED_URL".to_string(),
            value: format!("{} ({})", template, e),
        }
    })?;

    Ok(())
}
