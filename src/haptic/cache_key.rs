//! Cache key derivation
//!
//! Keys are `haptic_pattern:<md5 hex>` over the JSON of
//! `{intensity, speed, text}` with keys in lexicographic order and the text
//! uppercased, so requests differing only in letter case share an entry.

use std::collections::BTreeMap;

use serde::Serialize;

use super::TranslateError;

/// Namespace prefix on every key
pub const CACHE_KEY_PREFIX: &str = "haptic_pattern";

/// Opaque, stable identifier of a (text, speed, intensity) combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the cache key for a translation.
///
/// Speed and intensity should already be clamped so that every request
/// that produces the same pattern also produces the same key.
pub fn derive_cache_key(
    text: &str,
    speed_factor: f64,
    intensity: f64,
) -> Result<CacheKey, TranslateError> {
    let mut params: BTreeMap<&str, serde_json::Value> = BTreeMap::new();
    params.insert("speed", serde_json::Value::from(speed_factor));
    params.insert("intensity", serde_json::Value::from(intensity));
    params.insert("text", serde_json::Value::from(text.to_uppercase()));

    let serialized = serde_json::to_vec(&params)?;
    let digest = md5::compute(&serialized);

    Ok(CacheKey(format!("{CACHE_KEY_PREFIX}:{digest:x}")))
}
