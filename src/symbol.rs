//! Module: symbol
//!
//! Purpose: timing primitives and the static Morse symbol table.
//!
//! A [`Symbol`] is one primitive of the flash stream: a mark (dot or dash,
//! output held high) or a pure timing gap (output stays low). The table maps
//! one input byte to its ordered mark sequence; gap insertion between marks
//! and between letters is the translator's job, not the table's.
//!
//! Safety: Safe. No unsafe blocks. Copy types and static data only.

/// One timing primitive of the flash stream.
///
/// Produced by the line translator, consumed exactly once by the actuator,
/// in strict FIFO order. Carries no state beyond its tag; every duration is
/// an integer multiple of the configured base unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// Mark, output high for 1 unit.
    Dot,
    /// Mark, output high for 3 units.
    Dash,
    /// Gap between marks of the same letter, 1 unit.
    MarkGap,
    /// Gap between letters of the same word, 3 units.
    LetterGap,
    /// Gap between words, 7 units.
    WordGap,
}

impl Symbol {
    /// Duration of this primitive in base units.
    #[inline]
    pub const fn units(self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
            Symbol::MarkGap => 1,
            Symbol::LetterGap => 3,
            Symbol::WordGap => 7,
        }
    }

    /// True for primitives that hold the output high (dot, dash).
    ///
    /// Gaps keep the output low; they are pure waits.
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Symbol::Dot | Symbol::Dash)
    }
}

/// Look up the mark sequence for one input byte.
///
/// Total over all byte values:
/// - `a`-`z`, `0`-`9`, `,` and `.` yield their International Morse marks
///   (dots and dashes only, no gaps).
/// - Space yields a single [`Symbol::WordGap`]; the word gap subsumes
///   letter spacing, so it gets no further framing.
/// - Anything else yields the empty slice: unknown input is displayed but
///   not flashed, with no error raised.
///
/// The table is fixed for the process lifetime. Only lowercase letters are
/// keyed; serial input is expected in lowercase.
pub fn encode(byte: u8) -> &'static [Symbol] {
    use Symbol::{Dash, Dot};

    match byte {
        b'a' => &[Dot, Dash],
        b'b' => &[Dash, Dot, Dot, Dot],
        b'c' => &[Dash, Dot, Dash, Dot],
        b'd' => &[Dash, Dot, Dot],
        b'e' => &[Dot],
        b'f' => &[Dot, Dot, Dash, Dot],
        b'g' => &[Dash, Dash, Dot],
        b'h' => &[Dot, Dot, Dot, Dot],
        b'i' => &[Dot, Dot],
        b'j' => &[Dot, Dash, Dash, Dash],
        b'k' => &[Dash, Dot, Dash],
        b'l' => &[Dot, Dash, Dot, Dot],
        b'm' => &[Dash, Dash],
        b'n' => &[Dash, Dot],
        b'o' => &[Dash, Dash, Dash],
        b'p' => &[Dot, Dash, Dash, Dot],
        b'q' => &[Dash, Dash, Dot, Dash],
        b'r' => &[Dot, Dash, Dot],
        b's' => &[Dot, Dot, Dot],
        b't' => &[Dash],
        b'u' => &[Dot, Dot, Dash],
        b'v' => &[Dot, Dot, Dot, Dash],
        b'w' => &[Dot, Dash, Dash],
        b'x' => &[Dash, Dot, Dot, Dash],
        b'y' => &[Dash, Dot, Dash, Dash],
        b'z' => &[Dash, Dash, Dot, Dot],
        b'0' => &[Dash, Dash, Dash, Dash, Dash],
        b'1' => &[Dot, Dash, Dash, Dash, Dash],
        b'2' => &[Dot, Dot, Dash, Dash, Dash],
        b'3' => &[Dot, Dot, Dot, Dash, Dash],
        b'4' => &[Dot, Dot, Dot, Dot, Dash],
        b'5' => &[Dot, Dot, Dot, Dot, Dot],
        b'6' => &[Dash, Dot, Dot, Dot, Dot],
        b'7' => &[Dash, Dash, Dot, Dot, Dot],
        b'8' => &[Dash, Dash, Dash, Dot, Dot],
        b'9' => &[Dash, Dash, Dash, Dash, Dot],
        b',' => &[Dash, Dash, Dot, Dot, Dash, Dash],
        b'.' => &[Dot, Dash, Dot, Dash, Dot, Dash],
        b' ' => &[Symbol::WordGap],
        _ => &[],
    }
}

/// True if the byte has a timing effect (marks or a word gap).
#[inline]
pub fn is_supported(byte: u8) -> bool {
    !encode(byte).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_durations() {
        assert_eq!(Symbol::Dot.units(), 1);
        assert_eq!(Symbol::Dash.units(), 3);
        assert!(Symbol::Dot.is_mark());
        assert!(Symbol::Dash.is_mark());
    }

    #[test]
    fn test_gap_durations() {
        assert_eq!(Symbol::MarkGap.units(), 1);
        assert_eq!(Symbol::LetterGap.units(), 3);
        assert_eq!(Symbol::WordGap.units(), 7);
        assert!(!Symbol::MarkGap.is_mark());
        assert!(!Symbol::LetterGap.is_mark());
        assert!(!Symbol::WordGap.is_mark());
    }

    #[test]
    fn test_table_is_marks_only() {
        // Gap framing belongs to the translator; the table stores bare
        // marks for everything except the word gap itself.
        for byte in 0u8..=255 {
            if byte == b' ' {
                continue;
            }
            for &sym in encode(byte) {
                assert!(sym.is_mark(), "{:?} leaked into entry for {:#x}", sym, byte);
            }
        }
    }

    #[test]
    fn test_space_maps_to_word_gap() {
        assert_eq!(encode(b' '), &[Symbol::WordGap]);
    }

    #[test]
    fn test_unsupported_bytes_are_empty() {
        assert!(encode(b'!').is_empty());
        assert!(encode(b'A').is_empty()); // uppercase is not keyed
        assert!(encode(b'\r').is_empty());
        assert!(encode(0xff).is_empty());
    }

    #[test]
    fn test_supported_alphabet_is_complete() {
        let supported = "abcdefghijklmnopqrstuvwxyz0123456789,. ";
        for byte in supported.bytes() {
            assert!(is_supported(byte), "missing entry for {:?}", byte as char);
        }
        assert_eq!((0u8..=255).filter(|&b| is_supported(b)).count(), supported.len());
    }

    #[test]
    fn test_known_encodings() {
        use Symbol::{Dash, Dot};
        assert_eq!(encode(b's'), &[Dot, Dot, Dot]);
        assert_eq!(encode(b'o'), &[Dash, Dash, Dash]);
        assert_eq!(encode(b'k'), &[Dash, Dot, Dash]);
        assert_eq!(encode(b'q'), &[Dash, Dash, Dot, Dash]);
        assert_eq!(encode(b'4'), &[Dot, Dot, Dot, Dot, Dash]);
        assert_eq!(encode(b'.'), &[Dot, Dash, Dot, Dash, Dot, Dash]);
    }
}
