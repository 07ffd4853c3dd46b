//! Lock-free bounded SPSC (Single Producer, Single Consumer) queue.
//!
//! Both pipeline hand-offs flow through this primitive:
//!
//! ```text
//! Collector ──▶ SpscQueue<u8>     ──▶ Translator
//! Translator ──▶ SpscQueue<Symbol> ──▶ Actuator
//! ```
//!
//! FIFO order is the only ordering guarantee: nothing is ever dropped or
//! reordered. When a queue is full the producer blocks (spin with a short
//! idle delay); when it is empty the consumer blocks the same way. That
//! blocking is the system's entire backpressure story.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use embedded_hal::delay::DelayNs;

use crate::config::IDLE_POLL_US;

/// Fixed-capacity lock-free FIFO for exactly one producer and one consumer.
///
/// # Safety
///
/// This type uses `UnsafeCell` internally but is safe to use because:
/// - Exactly one producer and one consumer (enforced by design, not by the
///   type system: each side of the pipeline holds one role).
/// - The producer is the only writer of `write_idx` and of the slot it
///   claims; the consumer is the only writer of `read_idx`.
/// - All cross-thread coordination goes through the two atomic indices.
///
/// # Memory ordering
///
/// - Producer stores `write_idx` with `Release` after filling the slot.
/// - Consumer loads `write_idx` with `Acquire` before reading the slot,
///   and stores `read_idx` with `Release` after emptying it.
/// - Producer loads `read_idx` with `Acquire` before reusing a slot.
///
/// Capacity may be any non-zero value (the default sizing is 100), so the
/// indices wrap at `2 * N` instead of relying on a power-of-two mask: with
/// both indices in `[0, 2N)`, `read == write` means empty and a distance of
/// `N` means full, with no ambiguity between the two.
pub struct SpscQueue<T, const N: usize> {
    slots: UnsafeCell<[Option<T>; N]>,

    /// Producer cursor in `[0, 2N)`.
    write_idx: AtomicUsize,

    /// Consumer cursor in `[0, 2N)`.
    read_idx: AtomicUsize,
}

// SAFETY: one producer, one consumer, atomic index coordination. No slot is
// ever accessed by both sides at the same time within the protocol.
unsafe impl<T: Send, const N: usize> Sync for SpscQueue<T, N> {}
unsafe impl<T: Send, const N: usize> Send for SpscQueue<T, N> {}

impl<T: Copy, const N: usize> SpscQueue<T, N> {
    /// Index wrap point. Cursors live in `[0, WRAP)`.
    const WRAP: usize = 2 * N;

    /// Create a new empty queue.
    pub const fn new() -> Self {
        assert!(N > 0, "queue capacity must be non-zero");

        Self {
            slots: UnsafeCell::new([None; N]),
            write_idx: AtomicUsize::new(0),
            read_idx: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn advance(idx: usize) -> usize {
        if idx + 1 == Self::WRAP {
            0
        } else {
            idx + 1
        }
    }

    /// Number of occupied slots implied by a cursor pair.
    #[inline]
    fn occupied(read: usize, write: usize) -> usize {
        (write + Self::WRAP - read) % Self::WRAP
    }

    /// Try to enqueue without blocking.
    ///
    /// Returns the value back in `Err` when the queue is full, so the caller
    /// can retry without cloning.
    ///
    /// Producer side only. O(1), never allocates.
    #[inline]
    pub fn try_send(&self, value: T) -> Result<(), T> {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if Self::occupied(read, write) == N {
            return Err(value);
        }

        // SAFETY: the slot at `write % N` is free (not full, and the
        // consumer never touches slots at or past `write`).
        unsafe {
            (*self.slots.get())[write % N] = Some(value);
        }

        self.write_idx.store(Self::advance(write), Ordering::Release);
        Ok(())
    }

    /// Try to dequeue without blocking. Consumer side only.
    #[inline]
    pub fn try_recv(&self) -> Option<T> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: the queue is non-empty, so the slot at `read % N` was
        // published by the producer and is not being written.
        let value = unsafe { (*self.slots.get())[read % N].take() };

        self.read_idx.store(Self::advance(read), Ordering::Release);
        value
    }

    /// Enqueue, blocking until space is available.
    ///
    /// Spins with one `IDLE_POLL_US` delay per failed attempt. The pending
    /// value is never dropped and never reordered past a later send.
    pub fn send(&self, value: T, idle: &mut impl DelayNs) {
        let mut pending = value;
        loop {
            match self.try_send(pending) {
                Ok(()) => return,
                Err(rejected) => {
                    pending = rejected;
                    idle.delay_us(IDLE_POLL_US);
                }
            }
        }
    }

    /// Dequeue, blocking until a value is available.
    pub fn recv(&self, idle: &mut impl DelayNs) -> T {
        loop {
            if let Some(value) = self.try_recv() {
                return value;
            }
            idle.delay_us(IDLE_POLL_US);
        }
    }

    /// Number of values currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        let read = self.read_idx.load(Ordering::Acquire);
        let write = self.write_idx.load(Ordering::Acquire);
        Self::occupied(read, write)
    }

    /// True when nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when a send would block.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Fixed capacity of the queue.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T: Copy, const N: usize> Default for SpscQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
