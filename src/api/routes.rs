//! API route definitions
//!
//! - / and /health - service descriptor
//! - /haptic_translate/ - text to haptic pattern (with and without trailing slash)
//! - /cache/clear - drop every cached pattern
//! - /cache/status - entry count and sample keys

use axum::{routing::{get, post}, Router};

use super::handlers::{self, AppState};

/// Create all API routes
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/haptic_translate/", post(handlers::haptic_translate))
        .route("/haptic_translate", post(handlers::haptic_translate))
        .route("/cache/clear", post(handlers::clear_cache))
        .route("/cache/status", get(handlers::cache_status))
        .with_state(state)
}
