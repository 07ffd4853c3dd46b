//! Module: config
//!
//! Purpose: compile-time configuration for the flasher pipeline.
//!
//! Everything here is fixed for the process lifetime. There is no runtime
//! reconfiguration: queues are sized once at startup and the code speed
//! never changes while flashing.

use crate::symbol::Symbol;

/// Base timing unit in milliseconds. Every symbol duration is an integer
/// multiple of this.
pub const DEFAULT_UNIT_MS: u32 = 20;

/// Capacity of the raw character line buffer.
pub const CHAR_QUEUE_CAPACITY: usize = 100;

/// Capacity of the symbol stream between translator and actuator.
pub const SYMBOL_QUEUE_CAPACITY: usize = 100;

/// Spin granularity for blocking queue operations and empty input polls.
pub const IDLE_POLL_US: u32 = 500;

/// Timing configuration for one flasher instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlasherConfig {
    /// Duration of one base unit in milliseconds.
    pub unit_ms: u32,
}

impl FlasherConfig {
    /// Default configuration.
    pub const DEFAULT: Self = Self {
        unit_ms: DEFAULT_UNIT_MS,
    };

    /// Configuration with an explicit base unit.
    pub const fn with_unit_ms(unit_ms: u32) -> Self {
        Self { unit_ms }
    }

    /// Configuration for a given code speed in words per minute.
    ///
    /// PARIS timing: one unit is 1.2 / WPM seconds. The speed is chosen at
    /// construction and stays fixed for the process lifetime.
    pub const fn with_wpm(wpm: u32) -> Self {
        Self {
            unit_ms: 1_200 / wpm,
        }
    }

    /// Wall-clock duration of one symbol in milliseconds.
    #[inline]
    pub const fn symbol_ms(&self, symbol: Symbol) -> u32 {
        symbol.units() * self.unit_ms
    }
}

impl Default for FlasherConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
