//! fastio Hardware Abstraction Layer
//!
//! This crate defines the seams between the pin logic in `fastio-core` and a
//! concrete microcontroller. Every trait here is resolved statically: register
//! access, interrupt control and busy-waiting are associated functions on
//! zero-sized types, so a board implementation compiles down to the same
//! instructions as hand-written register code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (fastio-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fastio-core (Gpio, Button)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fastio-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ fastio-hal-   │       │ fastio-core   │
//! │  atmega328p   │       │  sim (host)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::DirectionPin`] - Digital I/O
//! - [`register::RegisterSpace`] - Volatile access to memory-mapped registers
//! - [`interrupt::InterruptControl`] - Global interrupt enable/disable
//! - [`delay::BusyWait`] - Cycle-counted delay loop
//! - [`time::Millis`] - Millisecond clock source
//! - [`board::Board`] - Board variant tying the above together

#![no_std]

pub mod board;
pub mod delay;
pub mod gpio;
pub mod interrupt;
pub mod register;
pub mod time;

// Re-export key traits at crate root for convenience
pub use board::Board;
pub use delay::BusyWait;
pub use gpio::{DirectionPin, InputPin, OutputPin};
pub use interrupt::InterruptControl;
pub use register::RegisterSpace;
pub use time::Millis;
