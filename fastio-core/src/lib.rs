//! Compile-time pin identities and zero-overhead digital I/O
//!
//! This crate contains the board-agnostic pin logic:
//!
//! - Pin identifier encoding (register block address + bit position)
//! - Register-level GPIO operations specialized per pin at compile time
//! - Interrupt-free critical sections for timed pulses
//! - Debounced button state machine with edge detection
//! - Configuration types
//! - Host-side register simulator (`sim` feature)
//!
//! # Example
//!
//! ```ignore
//! use fastio_core::{Button, Gpio};
//! use fastio_hal_atmega328p::{millis::SystemClock, uno, Uno};
//!
//! let mut led = Gpio::<Uno, { uno::D13 }>::new();
//! led.output();
//!
//! let mut button = Button::new(Gpio::<Uno, { uno::D2 }>::new(), SystemClock);
//! loop {
//!     if button.is_changed() && !button.read() {
//!         led.toggle();
//!     }
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "sim"))]
extern crate std;

pub mod button;
pub mod config;
pub mod critical;
pub mod gpio;
pub mod pin;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use button::{Button, Edge};
pub use gpio::Gpio;
pub use pin::{PinId, RegisterBlock};
