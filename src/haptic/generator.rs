//! Pattern generator: text → ordered vibrate/pause instructions
//!
//! Walks the uppercased text one character at a time:
//! - `.`, `!`, `?` emit a sentence gap
//! - space emits a word gap
//! - supported characters emit one vibration per pulse, a fixed 50 ms gap
//!   between pulses, then a letter gap unless the next character is a space
//!   or this is the last character
//! - anything else is skipped and reported as unsupported
//!
//! Every message ends with a sentence gap. Speed-scaled durations are
//! `base / speed_factor` truncated toward zero.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::symbols::{
    pulse_code, render_code, INTER_SYMBOL_GAP_MS, LETTER_GAP_MS, SENTENCE_GAP_MS, WORD_GAP_MS,
};
use crate::types::{Instruction, TraceId};

/// Output of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct HapticPattern {
    pub instructions: Vec<Instruction>,
    /// Exact sum of every instruction duration
    pub total_duration_ms: u64,
    /// Distinct characters that were skipped
    pub unsupported: BTreeSet<char>,
}

/// Scale a base duration by the speed factor, truncating toward zero.
pub fn scale_duration(base_ms: u64, speed_factor: f64) -> u64 {
    // `as` saturates for infinities and maps NaN to 0
    (base_ms as f64 / speed_factor) as u64
}

/// Accumulates instructions and their running total together so the sum
/// cannot drift from the sequence.
#[derive(Default)]
struct PatternBuilder {
    instructions: Vec<Instruction>,
    total_duration_ms: u64,
}

impl PatternBuilder {
    fn push(&mut self, instruction: Instruction) {
        self.total_duration_ms = self
            .total_duration_ms
            .saturating_add(instruction.duration_ms());
        self.instructions.push(instruction);
    }

    fn vibrate(&mut self, duration_ms: u64, intensity: f64) {
        self.push(Instruction::vibrate(duration_ms, intensity));
    }

    fn pause(&mut self, duration_ms: u64) {
        self.push(Instruction::pause(duration_ms));
    }
}

/// Convert `text` into a haptic instruction sequence.
///
/// Never fails: unsupported characters are skipped and logged.
pub fn generate_pattern(
    text: &str,
    speed_factor: f64,
    intensity: f64,
    trace: Option<&TraceId>,
) -> HapticPattern {
    let trace_id = trace.map_or("-", TraceId::as_str);
    let chars: Vec<char> = text.to_uppercase().chars().collect();

    debug!(trace_id, chars = chars.len(), "Converting text to haptic pattern");

    let sentence_gap = scale_duration(SENTENCE_GAP_MS, speed_factor);
    let word_gap = scale_duration(WORD_GAP_MS, speed_factor);
    let letter_gap = scale_duration(LETTER_GAP_MS, speed_factor);

    let mut builder = PatternBuilder::default();
    let mut unsupported = BTreeSet::new();

    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '.' | '!' | '?' => {
                builder.pause(sentence_gap);
                debug!(trace_id, duration_ms = sentence_gap, "Added end of sentence pause");
            }
            ' ' => {
                builder.pause(word_gap);
                debug!(trace_id, duration_ms = word_gap, "Added word space");
            }
            _ => match pulse_code(ch) {
                Some(code) => {
                    debug!(trace_id, %ch, code = %render_code(code), "Processing character");

                    for (n, pulse) in code.iter().enumerate() {
                        builder.vibrate(
                            scale_duration(pulse.base_duration_ms(), speed_factor),
                            intensity,
                        );
                        if n + 1 < code.len() {
                            builder.pause(INTER_SYMBOL_GAP_MS);
                        }
                    }

                    if chars.get(i + 1).is_some_and(|&next| next != ' ') {
                        builder.pause(letter_gap);
                    }
                }
                None => {
                    unsupported.insert(ch);
                    warn!(trace_id, %ch, position = i, "Unsupported character, skipping");
                }
            },
        }
    }

    if !unsupported.is_empty() {
        let listed: Vec<String> = unsupported.iter().map(char::to_string).collect();
        warn!(
            trace_id,
            count = unsupported.len(),
            chars = %listed.join(", "),
            "Found unsupported characters"
        );
    }

    // End of message marker
    builder.pause(sentence_gap);

    info!(
        trace_id,
        elements = builder.instructions.len(),
        total_duration_ms = builder.total_duration_ms,
        "Generated haptic pattern"
    );

    HapticPattern {
        instructions: builder.instructions,
        total_duration_ms: builder.total_duration_ms,
        unsupported,
    }
}
