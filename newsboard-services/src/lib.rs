//! Service layer for the keyword news board
//!
//! This crate owns the in-memory news cache and the background task
//! that keeps it fresh.

pub mod news_cache;
pub mod refresher;

pub use news_cache::{CacheStatus, NewsCache, RefreshOutcome};
pub use refresher::spawn_refresh_loop;
