//! ATmega328P board support for fastio
//!
//! This crate provides the ATmega328P implementation of the `fastio-hal`
//! traits and the pin table shared by the boards built around it:
//!
//! - Arduino Uno, Duemilanove, Nano, Mini, Ethernet, BT, Uno WiFi (16 MHz)
//! - Arduino Fio, LilyPad, Pro 3.3V (8 MHz)
//!
//! # Targets
//!
//! The pin table ([`uno`]) and board constants build on any target so that
//! host-side build scripts and tests can use them. The [`Board`] impls and
//! the peripherals behind them (interrupts, delay loop, millisecond timer)
//! are only compiled for `target_arch = "avr"`.
//!
//! [`Board`]: fastio_hal::Board

#![no_std]
#![cfg_attr(
    target_arch = "avr",
    feature(asm_experimental_arch, abi_avr_interrupt)
)]

pub mod board;
#[cfg(target_arch = "avr")]
pub mod delay;
#[cfg(target_arch = "avr")]
pub mod interrupt;
#[cfg(target_arch = "avr")]
pub mod millis;
pub mod registers;
pub mod uno;

pub use board::{
    Atmega328p, Bt, Duemilanove, Ethernet, Fio, LilyPad, Mini, Nano, Pro, Pro8MHz, Uno,
    UnoWifiDevEd,
};
pub use registers::Mmio;
