//! Module: actuator
//!
//! Purpose: the timing end of the pipeline. A single perpetual consumer
//! that blocks on the symbol queue and turns each primitive into a
//! real-time pulse or pause on the output pin.
//!
//! The actuator is the only owner of the pin. No other component may
//! assert the output state, which removes races on the hardware line by
//! construction.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::FlasherConfig;
use crate::queue::SpscQueue;
use crate::symbol::Symbol;

/// Drives the physical output from the symbol stream.
///
/// Per symbol there are exactly two states: wait for the next symbol, then
/// execute it for its full duration. Marks hold the pin high, gaps are pure
/// waits with the pin untouched (it is already low).
pub struct FlashActuator<'a, P, D, const S: usize> {
    symbols: &'a SpscQueue<Symbol, S>,
    pin: P,
    delay: D,
    config: FlasherConfig,
}

impl<'a, P, D, const S: usize> FlashActuator<'a, P, D, S>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create an actuator owning the output pin and delay source.
    pub fn new(symbols: &'a SpscQueue<Symbol, S>, pin: P, delay: D, config: FlasherConfig) -> Self {
        Self {
            symbols,
            pin,
            delay,
            config,
        }
    }

    /// Execute one symbol for its exact duration.
    ///
    /// Pin errors propagate; on most GPIO implementations `P::Error` is
    /// `Infallible` and this can never fail.
    pub fn execute(&mut self, symbol: Symbol) -> Result<(), P::Error> {
        let hold_ms = self.config.symbol_ms(symbol);

        if symbol.is_mark() {
            self.pin.set_high()?;
            self.delay.delay_ms(hold_ms);
            self.pin.set_low()?;
        } else {
            self.delay.delay_ms(hold_ms);
        }

        Ok(())
    }

    /// Run forever: block on the queue, execute, repeat.
    ///
    /// The blocking receive is the task's only suspension point. Returns
    /// only if a pin write fails.
    pub fn run(&mut self) -> Result<Infallible, P::Error> {
        loop {
            let symbol = self.symbols.recv(&mut self.delay);
            self.execute(symbol)?;
        }
    }

    /// Timing configuration in effect.
    pub fn config(&self) -> &FlasherConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        High,
        Low,
        WaitMs(u32),
    }

    /// Pin and delay share one trace so relative ordering is visible.
    #[derive(Clone)]
    struct Trace(Rc<RefCell<Vec<Event>>>);

    impl Trace {
        fn new() -> Self {
            Trace(Rc::new(RefCell::new(Vec::new())))
        }

        fn events(&self) -> Vec<Event> {
            self.0.borrow().clone()
        }
    }

    struct TracePin(Trace);

    impl embedded_hal::digital::ErrorType for TracePin {
        type Error = Infallible;
    }

    impl OutputPin for TracePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0 .0.borrow_mut().push(Event::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 .0.borrow_mut().push(Event::High);
            Ok(())
        }
    }

    struct TraceDelay(Trace);

    impl DelayNs for TraceDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0 .0.borrow_mut().push(Event::WaitMs(ns / 1_000_000));
        }
    }

    fn actuator_with_trace(
        symbols: &SpscQueue<Symbol, 16>,
    ) -> (FlashActuator<'_, TracePin, TraceDelay, 16>, Trace) {
        let trace = Trace::new();
        let actuator = FlashActuator::new(
            symbols,
            TracePin(trace.clone()),
            TraceDelay(trace.clone()),
            FlasherConfig::with_unit_ms(20),
        );
        (actuator, trace)
    }

    #[test]
    fn test_dot_pulses_one_unit() {
        let symbols: SpscQueue<Symbol, 16> = SpscQueue::new();
        let (mut actuator, trace) = actuator_with_trace(&symbols);

        actuator.execute(Symbol::Dot).unwrap();
        assert_eq!(
            trace.events(),
            vec![Event::High, Event::WaitMs(20), Event::Low]
        );
    }

    #[test]
    fn test_dash_pulses_three_units() {
        let symbols: SpscQueue<Symbol, 16> = SpscQueue::new();
        let (mut actuator, trace) = actuator_with_trace(&symbols);

        actuator.execute(Symbol::Dash).unwrap();
        assert_eq!(
            trace.events(),
            vec![Event::High, Event::WaitMs(60), Event::Low]
        );
    }

    #[test]
    fn test_gaps_never_touch_the_pin() {
        let symbols: SpscQueue<Symbol, 16> = SpscQueue::new();
        let (mut actuator, trace) = actuator_with_trace(&symbols);

        actuator.execute(Symbol::MarkGap).unwrap();
        actuator.execute(Symbol::LetterGap).unwrap();
        actuator.execute(Symbol::WordGap).unwrap();

        assert_eq!(
            trace.events(),
            vec![Event::WaitMs(20), Event::WaitMs(60), Event::WaitMs(140)]
        );
    }

    #[test]
    fn test_sequence_executes_in_fifo_order() {
        let symbols: SpscQueue<Symbol, 16> = SpscQueue::new();
        let (mut actuator, trace) = actuator_with_trace(&symbols);

        // "e t" as the translator would emit it.
        for sym in [Symbol::Dot, Symbol::WordGap, Symbol::Dash] {
            symbols.try_send(sym).unwrap();
        }
        while let Some(sym) = symbols.try_recv() {
            actuator.execute(sym).unwrap();
        }

        assert_eq!(
            trace.events(),
            vec![
                Event::High,
                Event::WaitMs(20),
                Event::Low,
                Event::WaitMs(140),
                Event::High,
                Event::WaitMs(60),
                Event::Low,
            ]
        );
    }
}
