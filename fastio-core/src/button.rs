//! Debounced button
//!
//! A mechanical switch bounces for a few milliseconds after contact, so an
//! instantaneous read can report several transitions per press. [`Button`]
//! only samples the pin when at least the debounce interval has passed since
//! the previous accepted poll, and reports a change when that sample differs
//! from the stored state. Bounces between two accepted polls are never seen.
//!
//! The switch is wired between the pin and ground with the internal pull-up
//! enabled, so the stored state is `true` when released and `false` when
//! pressed.

use fastio_hal::{DirectionPin, InputPin, Millis};

use crate::config::{ButtonConfig, DEFAULT_DEBOUNCE_MS};

/// Direction of a debounced transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Pin pulled to ground (high to low)
    Pressed,
    /// Pin returned to the pull-up level (low to high)
    Released,
}

/// Debounced input pin
///
/// Timestamps are kept as 16-bit milliseconds, so intervals wrap correctly
/// across the 65.536 s boundary.
pub struct Button<P, C> {
    pin: P,
    clock: C,
    debounce_ms: u16,
    /// Time of the last accepted poll
    timestamp: u16,
    /// Last sampled pin state
    state: bool,
}

impl<P, C> Button<P, C>
where
    P: InputPin + DirectionPin,
    C: Millis,
{
    /// Create a button with the default 50 ms debounce interval
    ///
    /// Puts the pin in input mode with the pull-up enabled.
    pub fn new(pin: P, clock: C) -> Self {
        Self::with_debounce(pin, clock, DEFAULT_DEBOUNCE_MS)
    }

    /// Create a button with the given debounce interval
    ///
    /// An interval of zero samples on every poll, with no debounce
    /// protection.
    pub fn with_debounce(mut pin: P, clock: C, debounce_ms: u16) -> Self {
        pin.set_input_pullup();
        Self {
            pin,
            clock,
            debounce_ms,
            timestamp: 0,
            state: true,
        }
    }

    /// Create a button from configuration
    pub fn from_config(pin: P, clock: C, config: &ButtonConfig) -> Self {
        Self::with_debounce(pin, clock, config.debounce_ms)
    }

    /// Poll the pin and report whether the debounced state changed
    ///
    /// Returns `false` without sampling if less than the debounce interval
    /// has passed since the last accepted poll. Otherwise the poll is
    /// accepted (its time becomes the new reference even if nothing
    /// changed) and the pin is sampled; a sample that differs from the
    /// stored state replaces it and returns `true`.
    ///
    /// Whether the edge was rising or falling is given by [`Button::read`]
    /// afterwards, or use [`Button::poll`].
    pub fn is_changed(&mut self) -> bool {
        let now = self.clock.millis() as u16;
        if now.wrapping_sub(self.timestamp) < self.debounce_ms {
            return false;
        }
        self.timestamp = now;

        let state = self.pin.is_high();
        if state == self.state {
            return false;
        }
        self.state = state;

        #[cfg(feature = "defmt")]
        defmt::trace!("button state {} at {=u16} ms", state, now);

        true
    }

    /// Poll the pin and return the debounced edge, if any
    pub fn poll(&mut self) -> Option<Edge> {
        if !self.is_changed() {
            return None;
        }
        Some(if self.state {
            Edge::Released
        } else {
            Edge::Pressed
        })
    }
}

impl<P, C> Button<P, C> {
    /// Debounced pin state, without sampling
    pub fn read(&self) -> bool {
        self.state
    }

    /// Whether the button is held down (debounced state low)
    pub fn is_pressed(&self) -> bool {
        !self.state
    }

    /// Time of the last accepted poll (ms, truncated to 16 bits)
    pub fn timestamp(&self) -> u16 {
        self.timestamp
    }

    /// Debounce interval (ms)
    pub fn debounce_ms(&self) -> u16 {
        self.debounce_ms
    }

    /// Give back the pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}
