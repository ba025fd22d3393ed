//! Keyword news fetching
//!
//! This crate provides:
//! - Google News RSS search client, one request per keyword
//! - RSS/Atom parsing into `NewsItem`s
//! - The fetch pipeline: per-keyword failure isolation, dedup by link,
//!   newest-first ranking and truncation

pub mod config;
pub mod error;
pub mod fetcher;
pub mod google_news;
pub mod parser;

pub use config::NewsConfig;
pub use error::{ConfigError, FeedError};
pub use fetcher::{FeedSource, FetchReport, KeywordOutcome, NewsFetcher};
pub use google_news::{build_feed_url, GoogleNewsClient};
pub use parser::parse_feed;
