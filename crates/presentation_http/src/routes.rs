//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// Weather responses are per-session and short-lived, so every response
/// carries no-store cache headers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather API (v1)
        .route("/v1/weather", get(handlers::weather::location_view))
        .route("/v1/weather/recent", get(handlers::weather::recent))
        // Place search API (v1)
        .route("/v1/cities", get(handlers::cities::search))
        .route("/v1/locate", get(handlers::locate::locate))
        // Responses must not be cached by clients or proxies
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        // Attach state
        .with_state(state)
}
