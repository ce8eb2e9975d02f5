//! Shared data structures for the haptic translation pipeline
//!
//! - `Instruction`: one vibrate/pause step of a playback sequence
//! - `TranslationRequest`: orchestrator input (text + raw preferences)
//! - `TranslationResult`: generated pattern plus summary, as returned to callers
//! - `TraceId`: per-request identifier threaded through diagnostics

use serde::{Deserialize, Serialize};

// ============================================================================
// Instructions
// ============================================================================

/// Discriminant of an [`Instruction`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InstructionKind {
    Vibrate,
    Pause,
}

/// One step of a haptic playback sequence.
///
/// Serialized as `{"type": "vibrate", "duration": 100, "intensity": 0.8}` or
/// `{"type": "pause", "duration": 50}`. Only vibrations carry an intensity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    Vibrate {
        #[serde(rename = "duration")]
        duration_ms: u64,
        intensity: f64,
    },
    Pause {
        #[serde(rename = "duration")]
        duration_ms: u64,
    },
}

impl Instruction {
    pub fn vibrate(duration_ms: u64, intensity: f64) -> Self {
        Instruction::Vibrate {
            duration_ms,
            intensity,
        }
    }

    pub fn pause(duration_ms: u64) -> Self {
        Instruction::Pause { duration_ms }
    }

    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Vibrate { .. } => InstructionKind::Vibrate,
            Instruction::Pause { .. } => InstructionKind::Pause,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            Instruction::Vibrate { duration_ms, .. } | Instruction::Pause { duration_ms } => {
                *duration_ms
            }
        }
    }

    /// Vibration intensity, `None` for pauses
    pub fn intensity(&self) -> Option<f64> {
        match self {
            Instruction::Vibrate { intensity, .. } => Some(*intensity),
            Instruction::Pause { .. } => None,
        }
    }

    pub fn is_vibrate(&self) -> bool {
        matches!(self, Instruction::Vibrate { .. })
    }
}

// ============================================================================
// Request / Result
// ============================================================================

/// Input to [`crate::haptic::HapticTranslator::translate`].
///
/// Preferences are raw caller values; the translator substitutes defaults
/// for missing or out-of-range values.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub speed_factor: Option<f64>,
    pub intensity: Option<f64>,
    pub use_cache: bool,
}

impl TranslationRequest {
    /// Request with default preferences and caching enabled
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speed_factor: None,
            intensity: None,
            use_cache: true,
        }
    }

    pub fn with_speed(mut self, speed_factor: f64) -> Self {
        self.speed_factor = Some(speed_factor);
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// Output of one translation.
///
/// `total_duration_ms` is always the exact sum of the pattern's durations.
/// `from_cache` is set by the translator only; stored copies keep `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationResult {
    pub pattern: Vec<Instruction>,
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: u64,
    /// Length of the original text in characters (before normalization)
    #[serde(rename = "characterCount")]
    pub character_count: usize,
    /// Original text, casing preserved
    #[serde(rename = "text")]
    pub source_text: String,
    #[serde(rename = "cached")]
    pub from_cache: bool,
}

impl TranslationResult {
    /// Number of vibrate instructions in the pattern
    pub fn vibration_count(&self) -> usize {
        self.pattern.iter().filter(|i| i.is_vibrate()).count()
    }
}

// ============================================================================
// Trace Identifier
// ============================================================================

/// Short request identifier attached to every diagnostic of one translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// Fresh identifier: the first 8 hex characters of a random UUID
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TraceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibrate_serializes_with_intensity() {
        let json = serde_json::to_value(Instruction::vibrate(100, 0.8)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "vibrate", "duration": 100, "intensity": 0.8}));
    }

    #[test]
    fn test_pause_serializes_without_intensity() {
        let json = serde_json::to_value(Instruction::pause(50)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "pause", "duration": 50}));
        assert!(Instruction::pause(50).intensity().is_none());
    }

    #[test]
    fn test_result_uses_wire_field_names() {
        let result = TranslationResult {
            pattern: vec![Instruction::pause(900)],
            total_duration_ms: 900,
            character_count: 1,
            source_text: "~".to_string(),
            from_cache: false,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalDuration"], 900);
        assert_eq!(json["characterCount"], 1);
        assert_eq!(json["text"], "~");
        assert_eq!(json["cached"], false);
    }

    #[test]
    fn test_vibration_count_ignores_pauses() {
        let result = TranslationResult {
            pattern: vec![
                Instruction::vibrate(100, 0.8),
                Instruction::pause(50),
                Instruction::vibrate(300, 0.8),
                Instruction::pause(900),
            ],
            total_duration_ms: 1350,
            character_count: 1,
            source_text: "A".to_string(),
            from_cache: false,
        };
        assert_eq!(result.vibration_count(), 2);
    }

    #[test]
    fn test_trace_id_is_eight_chars() {
        let id = TraceId::generate();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
