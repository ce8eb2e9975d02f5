//! Translation orchestrator
//!
//! Clamps caller preferences, consults the cache, generates on a miss and
//! stores the result. Cache hits come back with `from_cache = true`; the
//! stored copy never carries the flag.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::cache::TranslationCache;
use super::cache_key::derive_cache_key;
use super::generator::generate_pattern;
use super::TranslateError;
use crate::config::defaults;
use crate::types::{TraceId, TranslationRequest, TranslationResult};

/// Defaults and accepted ranges for caller preferences
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationSettings {
    pub default_speed: f64,
    pub default_intensity: f64,
    pub speed_range: RangeInclusive<f64>,
    pub intensity_range: RangeInclusive<f64>,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            default_speed: defaults::DEFAULT_SPEED_FACTOR,
            default_intensity: defaults::DEFAULT_INTENSITY,
            speed_range: defaults::MIN_SPEED_FACTOR..=defaults::MAX_SPEED_FACTOR,
            intensity_range: 0.0..=1.0,
        }
    }
}

/// Text-to-haptic translation service over an injected cache
pub struct HapticTranslator {
    cache: Arc<TranslationCache>,
    settings: TranslationSettings,
}

impl HapticTranslator {
    pub fn new(cache: Arc<TranslationCache>, settings: TranslationSettings) -> Self {
        Self { cache, settings }
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// Resolve raw preferences to the values used for generation.
    ///
    /// Missing values take the defaults. Out-of-range values (including NaN)
    /// are replaced by the defaults with a warning, never rejected.
    pub fn clamp_preferences(
        &self,
        speed_factor: Option<f64>,
        intensity: Option<f64>,
        trace: &TraceId,
    ) -> (f64, f64) {
        let s = &self.settings;

        let speed = match speed_factor {
            Some(v) if s.speed_range.contains(&v) => v,
            Some(v) => {
                warn!(trace_id = %trace, speed = v, fallback = s.default_speed, "Invalid speed factor, using default");
                s.default_speed
            }
            None => s.default_speed,
        };

        let intensity = match intensity {
            Some(v) if s.intensity_range.contains(&v) => v,
            Some(v) => {
                warn!(trace_id = %trace, intensity = v, fallback = s.default_intensity, "Invalid intensity, using default");
                s.default_intensity
            }
            None => s.default_intensity,
        };

        (speed, intensity)
    }

    /// Translate text into a haptic pattern, memoizing when requested.
    pub fn translate(
        &self,
        request: &TranslationRequest,
        trace: &TraceId,
    ) -> Result<TranslationResult, TranslateError> {
        let started = Instant::now();
        let text = request.text.as_str();

        if text.trim().is_empty() {
            return Err(TranslateError::EmptyText);
        }

        info!(trace_id = %trace, text = %preview(text), "Processing text");
        debug!(
            trace_id = %trace,
            speed = ?request.speed_factor,
            intensity = ?request.intensity,
            use_cache = request.use_cache,
            "User preferences"
        );

        let (speed, intensity) =
            self.clamp_preferences(request.speed_factor, request.intensity, trace);

        let cache_key = if request.use_cache {
            let key = derive_cache_key(text, speed, intensity)?;
            if let Some(mut cached) = self.cache.get(&key) {
                cached.from_cache = true;
                info!(
                    trace_id = %trace,
                    elapsed_ms = elapsed_ms(started),
                    "Cache HIT for haptic pattern"
                );
                return Ok(cached);
            }
            info!(trace_id = %trace, "Cache MISS for haptic pattern");
            Some(key)
        } else {
            info!(trace_id = %trace, "Cache bypassed as requested");
            None
        };

        let generated = generate_pattern(text, speed, intensity, Some(trace));

        let result = TranslationResult {
            pattern: generated.instructions,
            total_duration_ms: generated.total_duration_ms,
            character_count: text.chars().count(),
            source_text: text.to_string(),
            from_cache: false,
        };

        if let Some(key) = cache_key {
            self.cache.put(key, result.clone());
            debug!(trace_id = %trace, "Cached haptic pattern result");
        }

        info!(
            trace_id = %trace,
            elapsed_ms = elapsed_ms(started),
            pattern_len = result.pattern.len(),
            total_duration_ms = result.total_duration_ms,
            characters = result.character_count,
            "Processed haptic translation"
        );

        Ok(result)
    }
}

/// First characters of the text for log lines, with an ellipsis when cut
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(defaults::LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
