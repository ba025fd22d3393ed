//! Core types for the keyword news board
//!
//! This crate defines the shared data structures passed between the feed
//! fetcher, the news cache and the web layer.

pub mod news;

pub use news::{NewsItem, NewsPage, NewsSnapshot};
