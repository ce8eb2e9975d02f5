//! Cache administration endpoints

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::AppState;
use crate::haptic::CacheKey;

// ============================================================================
// Clear
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    /// Entries removed by this call
    pub removed: usize,
    /// Entries left afterwards (always 0)
    pub cache_size: usize,
}

/// POST /cache/clear - drop every cached pattern
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let removed = state.cache().clear();
    info!(removed, "Cache cleared");

    Json(ClearCacheResponse {
        message: format!("Cache cleared successfully. Removed {removed} entries."),
        removed,
        cache_size: 0,
    })
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CacheStatusResponse {
    pub cache_entries: usize,
    /// First few keys in insertion order
    pub cache_keys: Vec<CacheKey>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// `null` when the cache is unbounded
    pub max_entries: Option<usize>,
}

/// GET /cache/status - entry count and sample keys
pub async fn cache_status(State(state): State<AppState>) -> Json<CacheStatusResponse> {
    let cache = state.cache();
    let stats = cache.stats();

    Json(CacheStatusResponse {
        cache_entries: stats.entries,
        cache_keys: cache.snapshot_keys(state.status_sample_keys),
        hits: stats.hits,
        misses: stats.misses,
        evictions: stats.evictions,
        max_entries: stats.max_entries,
    })
}
