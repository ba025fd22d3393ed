//! Route definitions

mod health;
mod index;
mod news;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(news::routes())
        .merge(health::routes())
}

/// Full application router: HTML page at `/`, JSON under `/api`
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(index::routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
