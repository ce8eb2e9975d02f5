//! API route handlers
//!
//! Request handling logic for all API endpoints including:
//! - Text to haptic pattern translation
//! - Cache administration (clear, status)
//! - Liveness / service descriptor

mod cache;
mod health;
mod translate;

pub use cache::*;
pub use health::*;
pub use translate::*;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{defaults, ServiceConfig};
use crate::haptic::{HapticTranslator, TranslationCache};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Translator owning the shared result cache
    pub translator: Arc<HapticTranslator>,
    /// Keys listed by `/cache/status`
    pub status_sample_keys: usize,
    /// Request body limit applied by the router
    pub max_body_bytes: usize,
    /// Service start time for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(translator: Arc<HapticTranslator>) -> Self {
        Self {
            translator,
            status_sample_keys: defaults::STATUS_SAMPLE_KEYS,
            max_body_bytes: defaults::MAX_BODY_BYTES,
            started_at: Utc::now(),
        }
    }

    /// Build the translator, cache and limits from a loaded config
    pub fn from_config(config: &ServiceConfig) -> Self {
        let cache = Arc::new(TranslationCache::with_capacity_limit(config.cache.max_entries));
        let translator = HapticTranslator::new(cache, config.translation.to_settings());
        Self {
            status_sample_keys: config.cache.status_sample_keys,
            max_body_bytes: config.server.max_body_bytes,
            ..Self::new(Arc::new(translator))
        }
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        self.translator.cache()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}
