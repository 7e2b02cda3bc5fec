//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific pin types and consumed by drivers such as the debounced
//! button.

/// Digital output pin
///
/// Implementations drive the pin's output latch. On hardware where the same
/// latch enables a pull-up while in input mode, writing it in input mode
/// changes the pull-up instead of the line.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the output latch is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the output latch is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Reads the physical level of the line, which is valid in either mode.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin whose direction can be changed at runtime
pub trait DirectionPin {
    /// Put the pin in high-impedance input mode
    fn set_input(&mut self);

    /// Put the pin in input mode with the internal pull-up enabled
    fn set_input_pullup(&mut self);

    /// Put the pin in output mode
    fn set_output(&mut self);
}
