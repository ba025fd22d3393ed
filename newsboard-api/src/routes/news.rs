//! News JSON endpoint

use axum::{extract::State, response::Json, routing::get, Router};

use newsboard_core::NewsPage;

use crate::AppState;

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/news", get(get_news))
}

/// GET /api/news - Cached items, last update time and keywords
async fn get_news(State(state): State<AppState>) -> Json<NewsPage> {
    let snapshot = state.news_cache.snapshot();
    Json(NewsPage::from_snapshot(&snapshot, state.news_cache.keywords()))
}
