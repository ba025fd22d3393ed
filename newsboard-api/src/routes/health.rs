//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use newsboard_services::CacheStatus;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    cache: CacheStatus,
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let cache = state.news_cache.status();

    // Stale data after a failure is still served, so only "never updated" is unhealthy
    let (code, status) = match (cache.last_updated, cache.consecutive_failures) {
        (None, _) => (StatusCode::SERVICE_UNAVAILABLE, "starting"),
        (Some(_), 0) => (StatusCode::OK, "healthy"),
        (Some(_), _) => (StatusCode::OK, "degraded"),
    };

    let response = HealthResponse {
        status: status.to_string(),
        cache,
    };

    (code, Json(response))
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
