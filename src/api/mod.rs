//! REST API module using Axum
//!
//! Thin HTTP transport around the haptic translator:
//! - `POST /haptic_translate/` text → haptic pattern
//! - `POST /cache/clear`, `GET /cache/status` cache administration
//! - `GET /` and `GET /health` liveness

pub mod error;
pub mod handlers;
pub mod middleware;
mod routes;

pub use error::ApiError;
pub use handlers::AppState;

use std::any::Any;

use axum::http::{header, Method};
use axum::middleware as axum_mw;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `HAPTIC_CORS_ORIGINS` to a comma-separated list of allowed origins
/// for browser clients served from elsewhere.
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("HAPTIC_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Render a handler panic as the generic 500 body; the payload is logged only.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());
    tracing::error!(detail = %detail, "Handler panicked");
    ApiError::Internal(detail).into_response()
}

/// Create the complete application router.
pub fn create_app(state: AppState) -> Router {
    let cors = build_cors_layer();
    let body_limit = state.max_body_bytes;

    routes::api_routes(state)
        .layer(axum_mw::from_fn(middleware::assign_trace_id))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
