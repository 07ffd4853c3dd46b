//! MorseFlasher - host demonstration binary.
//!
//! Wires the pipeline to stdin and a console-rendered LED:
//! - a reader thread feeds stdin bytes into a non-blocking `CharSource`
//! - the collector task buffers a line and translates it on Enter
//! - the actuator task drives a fake LED that prints each completed pulse
//!   as `.` or `-` on stderr
//! - the main thread drains the diagnostics ring
//!
//! Type a line and hit Enter; watch it flash.

use std::convert::Infallible;
use std::io::{Read, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use morse_flasher::{
    CharSource, Collector, DiagLog, FlashActuator, FlasherConfig, SpscQueue, Symbol,
    CHAR_QUEUE_CAPACITY, SYMBOL_QUEUE_CAPACITY,
};

// Queues are created once and live for the process lifetime; nothing is
// ever resized or torn down.
static CHARS: SpscQueue<u8, CHAR_QUEUE_CAPACITY> = SpscQueue::new();
static SYMBOLS: SpscQueue<Symbol, SYMBOL_QUEUE_CAPACITY> = SpscQueue::new();
static DIAG: DiagLog = DiagLog::new();

/// Non-blocking poll over a channel fed by the stdin reader thread.
struct StdinSource(mpsc::Receiver<u8>);

impl CharSource for StdinSource {
    fn poll(&mut self) -> Option<u8> {
        self.0.try_recv().ok()
    }
}

/// Echo sink writing straight to stdout.
struct StdoutEcho;

impl std::fmt::Write for StdoutEcho {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        print!("{s}");
        let _ = std::io::stdout().flush();
        Ok(())
    }
}

/// Delay source backed by the OS clock.
struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Fake LED that renders each completed pulse on stderr.
///
/// Pulses at least two units long print as dashes, shorter ones as dots,
/// so the flashed line reads back as Morse on the console.
struct ConsoleLed {
    lit_since: Option<Instant>,
    dash_threshold: Duration,
}

impl ConsoleLed {
    fn new(config: &FlasherConfig) -> Self {
        Self {
            lit_since: None,
            dash_threshold: Duration::from_millis(u64::from(config.unit_ms) * 2),
        }
    }
}

impl ErrorType for ConsoleLed {
    type Error = Infallible;
}

impl OutputPin for ConsoleLed {
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.lit_since = Some(Instant::now());
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        if let Some(since) = self.lit_since.take() {
            let glyph = if since.elapsed() >= self.dash_threshold {
                '-'
            } else {
                '.'
            };
            eprint!("{glyph}");
        }
        Ok(())
    }
}

fn main() {
    let config = FlasherConfig::default();

    // Stdin reader: blocking reads, forwarded byte by byte.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for byte in std::io::stdin().bytes() {
            match byte {
                Ok(byte) => {
                    if tx.send(byte).is_err() {
                        return;
                    }
                }
                Err(_) => return,
            }
        }
    });

    // Actuator task: sole owner of the LED.
    thread::spawn(move || {
        let led = ConsoleLed::new(&config);
        let mut actuator = FlashActuator::new(&SYMBOLS, led, SleepDelay, config);
        match actuator.run() {
            Ok(never) => match never {},
            Err(e) => match e {},
        }
    });

    // Collector task: fused input collection and line translation.
    thread::spawn(move || {
        let mut collector = Collector::new(
            StdinSource(rx),
            StdoutEcho,
            SleepDelay,
            &CHARS,
            &SYMBOLS,
            &DIAG,
        );
        collector.run()
    });

    // Supervisor: drain diagnostics where blocking writes are fine.
    let mut reported_drops = 0;
    loop {
        while let Some(record) = DIAG.next() {
            eprintln!("[{}] {}", record.level.as_str(), record.text());
        }
        let dropped = DIAG.dropped();
        if dropped > reported_drops {
            eprintln!("[WARN] diagnostics dropped: {dropped}");
            reported_drops = dropped;
        }
        thread::sleep(Duration::from_millis(100));
    }
}
