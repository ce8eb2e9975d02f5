//! Haptic translation core
//!
//! - `symbols`: character → pulse code table and timing constants
//! - `generator`: text → vibrate/pause instruction sequence
//! - `cache_key`: deterministic key over normalized (text, speed, intensity)
//! - `cache`: shared in-memory result store
//! - `translator`: clamping, cache lookup, generation and store

pub mod cache;
pub mod cache_key;
pub mod generator;
pub mod symbols;
pub mod translator;

pub use cache::{CacheStats, TranslationCache};
pub use cache_key::{derive_cache_key, CacheKey};
pub use generator::{generate_pattern, HapticPattern};
pub use translator::{HapticTranslator, TranslationSettings};

use thiserror::Error;

/// Failures of the translation core
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("text must not be empty")]
    EmptyText,

    #[error("cache key derivation failed: {0}")]
    KeyDerivation(#[from] serde_json::Error),
}
