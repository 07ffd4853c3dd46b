//! # MorseFlasher
//!
//! Serial-to-Morse LED flasher built as a real-time producer/consumer
//! pipeline.
//!
//! ## Architecture
//!
//! ```text
//! serial bytes ──▶ Collector ──▶ SpscQueue<u8> ──▶ LineTranslator
//!                     │ (fused task, drains on CR/LF)    │
//!                     ▼                                  ▼
//!                  echo sink                    SpscQueue<Symbol>
//!                                                        │
//!                                                        ▼
//!                                                 FlashActuator ──▶ LED
//! ```
//!
//! Two perpetual tasks: the fused collector/translator buffers a line and
//! expands it into timing symbols; the actuator drains the symbol stream
//! and drives the output pin with exact delays. The bounded queues are the
//! only shared state, and blocking on a full queue is the only
//! backpressure. The actuator is the single writer of the pin.
//!
//! Hardware stays behind `embedded-hal` traits (`OutputPin`, `DelayNs`)
//! and the [`collector::CharSource`] poll boundary, so the whole pipeline
//! runs unchanged on a host for tests and demos.

#![cfg_attr(not(test), no_std)]

pub mod actuator;
pub mod collector;
pub mod config;
pub mod logging;
pub mod queue;
pub mod symbol;
pub mod translator;

pub use actuator::FlashActuator;
pub use collector::{CharSource, Collector};
pub use config::{FlasherConfig, CHAR_QUEUE_CAPACITY, SYMBOL_QUEUE_CAPACITY};
pub use logging::{DiagLog, Level};
pub use queue::SpscQueue;
pub use symbol::{encode, Symbol};
pub use translator::LineTranslator;
