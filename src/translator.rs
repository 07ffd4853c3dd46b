//! Module: translator
//!
//! Purpose: drain one buffered line of characters and expand it into the
//! symbol stream, inserting the spacing primitives the actuator needs.
//!
//! Spacing rules:
//! - Marks of the same letter are separated by one [`Symbol::MarkGap`].
//! - A non-space character gets one [`Symbol::LetterGap`] in front of it
//!   when the previous character of the line exists and was not a space.
//!   The first character of a line therefore never gets a leading gap, and
//!   a word gap is never doubled up with a letter gap.
//! - A space contributes a single [`Symbol::WordGap`] with no framing.
//!
//! A character with an empty mark sequence (unsupported input) still counts
//! as a non-space predecessor, so a letter gap can precede a character that
//! then produces no marks. Known quirk: spacing is decided before the table
//! lookup, so it does not depend on table membership.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::queue::SpscQueue;
use crate::symbol::{self, Symbol};

/// Expands buffered lines into timing symbols.
///
/// Consumer side of the character queue, producer side of the symbol queue.
/// Symbol enqueues block when the stream is full; the drain (and with it
/// further character collection) stalls until the actuator catches up.
pub struct LineTranslator<'a, const C: usize, const S: usize> {
    chars: &'a SpscQueue<u8, C>,
    symbols: &'a SpscQueue<Symbol, S>,
}

impl<'a, const C: usize, const S: usize> LineTranslator<'a, C, S> {
    /// Create a translator over the two pipeline queues.
    pub fn new(chars: &'a SpscQueue<u8, C>, symbols: &'a SpscQueue<Symbol, S>) -> Self {
        Self { chars, symbols }
    }

    /// Consume every currently buffered character as one complete line.
    ///
    /// Characters are processed in arrival order: each is echoed exactly
    /// once, then its symbols are enqueued. A trailing line break goes to
    /// the echo sink after the whole line. No partial-line state survives
    /// the call; the next drain starts fresh.
    ///
    /// Returns the number of characters processed.
    pub fn drain(&mut self, echo: &mut impl fmt::Write, idle: &mut impl DelayNs) -> usize {
        let mut prev: Option<u8> = None;
        let mut count = 0usize;

        while let Some(byte) = self.chars.try_recv() {
            let _ = echo.write_char(byte as char);

            // Letter spacing: only between two consecutive non-space
            // characters, never at the start of the line.
            if byte != b' ' {
                if let Some(prev_byte) = prev {
                    if prev_byte != b' ' {
                        self.symbols.send(Symbol::LetterGap, idle);
                    }
                }
            }

            let marks = symbol::encode(byte);
            for (i, &sym) in marks.iter().enumerate() {
                if i > 0 {
                    self.symbols.send(Symbol::MarkGap, idle);
                }
                self.symbols.send(sym, idle);
            }

            prev = Some(byte);
            count += 1;
        }

        let _ = echo.write_char('\n');
        count
    }
}
