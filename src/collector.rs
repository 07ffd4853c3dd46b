//! Module: collector
//!
//! Purpose: the input end of the pipeline. Polls the character source,
//! buffers bytes into the line queue, and on a line terminator performs
//! the whole drain-and-translate step inline before collecting again.
//!
//! The drain is synchronous by design: all symbols of line N are enqueued
//! before any byte of line N+1 is accepted, so the symbol stream can never
//! interleave two lines.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::logging::{DiagLog, Level};
use crate::queue::SpscQueue;
use crate::symbol::Symbol;
use crate::translator::LineTranslator;
use crate::diag;

/// Non-blocking character input boundary.
///
/// `poll` returns one received byte or `None` when nothing is pending.
/// Implementations wrap whatever the platform's serial/console reader is.
pub trait CharSource {
    fn poll(&mut self) -> Option<u8>;
}

/// Fused collection + translation task.
///
/// Producer side of the character queue; the embedded translator is its
/// consumer. Both roles live in this one task, so the queue still has
/// exactly one producer and one consumer.
pub struct Collector<'a, R, E, D, const C: usize, const S: usize> {
    source: R,
    echo: E,
    idle: D,
    chars: &'a SpscQueue<u8, C>,
    translator: LineTranslator<'a, C, S>,
    log: &'a DiagLog,
}

impl<'a, R, E, D, const C: usize, const S: usize> Collector<'a, R, E, D, C, S>
where
    R: CharSource,
    E: fmt::Write,
    D: DelayNs,
{
    /// Wire a collector to the pipeline queues.
    pub fn new(
        source: R,
        echo: E,
        idle: D,
        chars: &'a SpscQueue<u8, C>,
        symbols: &'a SpscQueue<Symbol, S>,
        log: &'a DiagLog,
    ) -> Self {
        Self {
            source,
            echo,
            idle,
            chars,
            translator: LineTranslator::new(chars, symbols),
            log,
        }
    }

    /// One poll step.
    ///
    /// - CR or LF: run the full line drain inline. The terminator itself is
    ///   never enqueued or translated.
    /// - Any other byte: blocking enqueue into the line buffer.
    /// - Nothing pending: no-op, returns `false`.
    pub fn poll_once(&mut self) -> bool {
        match self.source.poll() {
            Some(b'\r') | Some(b'\n') => {
                let count = self.translator.drain(&mut self.echo, &mut self.idle);
                diag!(self.log, Level::Info, "line drained: {} chars", count);
                true
            }
            Some(byte) => {
                self.chars.send(byte, &mut self.idle);
                true
            }
            None => false,
        }
    }

    /// Run forever, idling briefly whenever the source has nothing.
    pub fn run(&mut self) -> ! {
        loop {
            if !self.poll_once() {
                self.idle.delay_us(crate::config::IDLE_POLL_US);
            }
        }
    }

    /// Echo sink, for inspection.
    pub fn echo(&self) -> &E {
        &self.echo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Replays a fixed byte script, then reports idle forever.
    struct Script {
        bytes: Vec<u8>,
        next: usize,
    }

    impl Script {
        fn new(s: &str) -> Self {
            Self {
                bytes: s.as_bytes().to_vec(),
                next: 0,
            }
        }
    }

    impl CharSource for Script {
        fn poll(&mut self) -> Option<u8> {
            let byte = self.bytes.get(self.next).copied();
            self.next += 1;
            byte
        }
    }

    fn run_script(
        input: &str,
    ) -> (Vec<Symbol>, String, usize) {
        let chars: SpscQueue<u8, 128> = SpscQueue::new();
        let symbols: SpscQueue<Symbol, 1024> = SpscQueue::new();
        let log = DiagLog::new();

        let mut collector = Collector::new(
            Script::new(input),
            String::new(),
            NoDelay,
            &chars,
            &symbols,
            &log,
        );
        while collector.poll_once() {}

        let echoed = collector.echo().clone();
        let leftover = chars.len();
        let mut stream = Vec::new();
        while let Some(sym) = symbols.try_recv() {
            stream.push(sym);
        }
        (stream, echoed, leftover)
    }

    #[test]
    fn test_terminator_triggers_drain() {
        use Symbol::{Dot, MarkGap};
        let (stream, echoed, leftover) = run_script("i\n");

        assert_eq!(stream, vec![Dot, MarkGap, Dot]);
        assert_eq!(echoed, "i\n");
        assert_eq!(leftover, 0, "terminator must not be enqueued");
    }

    #[test]
    fn test_carriage_return_also_terminates() {
        use Symbol::Dash;
        let (stream, echoed, _) = run_script("t\r");

        assert_eq!(stream, vec![Dash]);
        assert_eq!(echoed, "t\n");
    }

    #[test]
    fn test_no_drain_without_terminator() {
        let (stream, echoed, leftover) = run_script("sos");

        assert!(stream.is_empty());
        assert_eq!(echoed, "");
        assert_eq!(leftover, 3, "characters stay buffered until a terminator");
    }

    #[test]
    fn test_lines_are_drained_separately() {
        use Symbol::{Dash, Dot};
        let (stream, echoed, _) = run_script("e\nt\n");

        // Two drains, no spacing carried across the line boundary.
        assert_eq!(stream, vec![Dot, Dash]);
        assert_eq!(echoed, "e\nt\n");
    }

    #[test]
    fn test_drain_is_logged() {
        let chars: SpscQueue<u8, 128> = SpscQueue::new();
        let symbols: SpscQueue<Symbol, 1024> = SpscQueue::new();
        let log = DiagLog::new();

        let mut collector = Collector::new(
            Script::new("hi\n"),
            String::new(),
            NoDelay,
            &chars,
            &symbols,
            &log,
        );
        while collector.poll_once() {}

        let record = log.next().expect("drain should log a record");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.text(), "line drained: 2 chars");
        assert!(log.next().is_none());
    }
}
