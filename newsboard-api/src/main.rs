//! Keyword News Board Server
//!
//! Serves the latest Google News results for a fixed keyword list and
//! refreshes them in the background.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use newsboard_feed::{GoogleNewsClient, NewsConfig, NewsFetcher};
use newsboard_services::{spawn_refresh_loop, NewsCache};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_PORT: u16 = 5000;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub news_cache: Arc<NewsCache>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newsboard_api=debug")),
        )
        .init();

    info!("Starting keyword news board");

    let config = NewsConfig::from_env()?;
    info!(
        "Tracking {} keywords, keeping {} items, refreshing every {}s",
        config.keywords.len(),
        config.max_items,
        config.refresh_interval.as_secs()
    );

    let client = Arc::new(GoogleNewsClient::from_config(&config));
    let fetcher = NewsFetcher::from_config(client, &config);
    let news_cache = Arc::new(NewsCache::new(fetcher, config.max_items));

    // First tick refreshes immediately
    let refresh_handle = spawn_refresh_loop(Arc::clone(&news_cache), config.refresh_interval);

    let state = AppState { news_cache };
    let app = routes::router(state);

    let port = server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh_handle.abort();
    info!("Refresh loop stopped, shutting down");

    Ok(())
}

/// SERVER_PORT, then PORT, then the default
fn server_port() -> u16 {
    ["SERVER_PORT", "PORT"]
        .iter()
        .find_map(|name| std::env::var(name).ok().and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
