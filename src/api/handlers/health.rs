//! Liveness endpoint

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use super::AppState;
use crate::config::defaults;

/// Static service descriptor
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_secs: i64,
}

/// GET / and GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: defaults::SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: (Utc::now() - state.started_at).num_seconds().max(0),
    })
}
