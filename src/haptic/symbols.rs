//! Haptic symbol table
//!
//! Static mapping from characters to short/long pulse codes, plus the base
//! timing constants every pattern is built from. All durations here are
//! pre-scaling values in milliseconds.

/// Gap between two pulses of the same character. Never speed-scaled.
pub const INTER_SYMBOL_GAP_MS: u64 = 50;

/// Gap between two characters of the same word.
pub const LETTER_GAP_MS: u64 = 200;

/// Gap emitted for a space.
pub const WORD_GAP_MS: u64 = 600;

/// Gap emitted for `.`, `!`, `?` and at the end of every message.
pub const SENTENCE_GAP_MS: u64 = 900;

/// Primitive unit of a character code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pulse {
    Short,
    Long,
}

impl Pulse {
    /// Vibration length before speed scaling
    pub const fn base_duration_ms(self) -> u64 {
        match self {
            Pulse::Short => 100,
            Pulse::Long => 300,
        }
    }

    /// Printable marker used in trace output
    pub const fn marker(self) -> char {
        match self {
            Pulse::Short => '•',
            Pulse::Long => '-',
        }
    }
}

use Pulse::{Long as L, Short as S};

/// Pulse code for an uppercase character, `None` if unsupported.
///
/// Space is supported with an empty code; callers treat it as a word gap.
pub fn pulse_code(ch: char) -> Option<&'static [Pulse]> {
    let code: &'static [Pulse] = match ch {
        'A' => &[S, L],
        'B' => &[S, L, S, L],
        'C' => &[S, S, L, S],
        'D' => &[S, S, S],
        'E' => &[S],
        'F' => &[S, S, S, L],
        'G' => &[L, L, S],
        'H' => &[S, S, S, S],
        'I' => &[S, S],
        'J' => &[S, L, L, L],
        'K' => &[L, S, L],
        'L' => &[S, L, S, S],
        'M' => &[L, L],
        'N' => &[L, S],
        'O' => &[L, L, L],
        'P' => &[S, L, L, S],
        'Q' => &[L, L, S, L],
        'R' => &[S, L, S],
        'S' => &[S, S, S],
        'T' => &[L],
        'U' => &[S, S, L],
        'V' => &[S, S, S, L],
        'W' => &[S, L, L],
        'X' => &[L, S, S, L],
        'Y' => &[L, S, L, L],
        'Z' => &[L, L, S, S],
        '#' => &[L],
        '0' => &[S, L, S],
        '1' => &[S],
        '2' => &[S, S],
        '3' => &[S, S, S],
        '4' => &[S, S, S, S],
        '5' => &[S, S, S, L],
        '6' => &[L, S],
        '7' => &[L, S, S],
        '8' => &[L, S, S, S],
        '9' => &[L, S, S, S, S],
        ' ' => &[],
        _ => return None,
    };
    Some(code)
}

pub fn is_supported(ch: char) -> bool {
    pulse_code(ch).is_some()
}

/// Render a code with pulse markers, e.g. `•-` for `A`
pub fn render_code(code: &[Pulse]) -> String {
    code.iter().map(|p| p.marker()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_letters_and_digits_supported() {
        for ch in ('A'..='Z').chain('0'..='9') {
            assert!(is_supported(ch), "{ch} should be supported");
        }
        assert!(is_supported('#'));
        assert!(is_supported(' '));
    }

    #[test]
    fn test_lowercase_is_not_in_table() {
        // The generator uppercases first
        assert!(!is_supported('a'));
        assert!(!is_supported('~'));
        assert!(!is_supported('é'));
    }

    #[test]
    fn test_letter_codes_have_one_to_four_pulses() {
        for ch in 'A'..='Z' {
            let len = pulse_code(ch).map_or(0, <[Pulse]>::len);
            assert!((1..=4).contains(&len), "{ch} has {len} pulses");
        }
    }

    #[test]
    fn test_sos_codes() {
        assert_eq!(render_code(pulse_code('S').unwrap()), "•••");
        assert_eq!(render_code(pulse_code('O').unwrap()), "---");
    }

    #[test]
    fn test_base_durations() {
        assert_eq!(Pulse::Short.base_duration_ms(), 100);
        assert_eq!(Pulse::Long.base_duration_ms(), 300);
    }
}
