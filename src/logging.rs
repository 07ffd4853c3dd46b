//! Diagnostics logging for the flasher pipeline.
//!
//! The collecting and flashing tasks must never block on console I/O, so
//! diagnostics go through a lock-free ring of fixed-size text records:
//!
//! ```text
//! Pipeline task           DiagLog              Supervisor
//! ─────────────           ───────              ──────────
//! diag_info!() ────────▶ [r0][r1][r2] ───────▶ console / UART
//! non-blocking            ring buffer          blocking ok
//! ```
//!
//! A full ring drops the record and counts the drop; it never stalls the
//! producer. Draining happens wherever blocking writes are acceptable.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::queue::SpscQueue;

/// Maximum record text length in bytes. Longer messages are truncated.
pub const MAX_MSG_LEN: usize = 96;

/// Number of records the ring holds.
pub const DIAG_CAPACITY: usize = 64;

/// Record severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// Fixed tag for console output.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

/// One diagnostics record.
#[derive(Clone, Copy)]
pub struct Record {
    pub level: Level,
    pub len: u8,
    pub msg: [u8; MAX_MSG_LEN],
}

impl Record {
    fn new(level: Level, msg: &[u8]) -> Self {
        let len = msg.len().min(MAX_MSG_LEN);
        let mut buf = [0u8; MAX_MSG_LEN];
        buf[..len].copy_from_slice(&msg[..len]);
        Self {
            level,
            len: len as u8,
            msg: buf,
        }
    }

    /// Record text. Empty if the bytes are not valid UTF-8.
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("")
    }
}

/// Lock-free diagnostics ring: one producing task, one draining task.
///
/// Built on the same SPSC ring as the pipeline queues; the only difference
/// in discipline is that a full log drops instead of blocking, because a
/// lost diagnostic beats a stalled pipeline.
pub struct DiagLog {
    ring: SpscQueue<Record, DIAG_CAPACITY>,
    dropped: AtomicU32,
}

impl DiagLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            ring: SpscQueue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a record. Returns `false` (and counts the drop) when full.
    ///
    /// O(1), never blocks, never allocates.
    #[inline]
    pub fn record(&self, level: Level, msg: &[u8]) -> bool {
        match self.ring.try_send(Record::new(level, msg)) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Take the next record, if any. Drain side only.
    #[inline]
    pub fn next(&self) -> Option<Record> {
        self.ring.try_recv()
    }

    /// Number of records waiting to be drained.
    #[inline]
    pub fn pending(&self) -> usize {
        self.ring.len()
    }

    /// Count of records dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for DiagLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncating `fmt::Write` adapter over a byte slice.
///
/// Formatting never fails; output past the end of the buffer is discarded.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.buf.len() - self.len;
        let take = bytes.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
        Ok(())
    }
}

/// Push a formatted record onto a [`DiagLog`].
#[macro_export]
macro_rules! diag {
    ($log:expr, $level:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let mut writer = $crate::logging::SliceWriter::new(&mut buf);
        let _ = ::core::fmt::write(&mut writer, ::core::format_args!($($arg)*));
        let len = writer.written().len();
        $log.record($level, &buf[..len]);
    }};
}

/// Info-level [`diag!`].
#[macro_export]
macro_rules! diag_info {
    ($log:expr, $($arg:tt)*) => {
        $crate::diag!($log, $crate::logging::Level::Info, $($arg)*)
    };
}

/// Warn-level [`diag!`].
#[macro_export]
macro_rules! diag_warn {
    ($log:expr, $($arg:tt)*) => {
        $crate::diag!($log, $crate::logging::Level::Warn, $($arg)*)
    };
}
