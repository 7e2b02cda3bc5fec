//! Millisecond clock driven by TC0
//!
//! Timer/Counter 0 runs in CTC mode with a /64 prescaler and raises a compare
//! interrupt once per millisecond. The counter is a `u32` guarded by an
//! interrupt-free mutex, since AVR cannot read it atomically.

use core::cell::Cell;

use avr_device::atmega328p::TC0;
use avr_device::interrupt::Mutex;
use fastio_hal::{Board, Millis};

use crate::board::timer0_counts;

static MILLIS_COUNTER: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Start the millisecond timer
///
/// Interrupts must be enabled afterwards for the counter to advance.
pub fn millis_init<B: Board>(tc0: TC0) {
    tc0.tccr0a.write(|w| w.wgm0().ctc());
    // Evaluated at compile time, so an unsupported clock fails the build
    let counts = const { timer0_counts(B::F_CPU) };
    tc0.ocr0a.write(|w| w.bits(counts));
    tc0.tccr0b.write(|w| w.cs0().prescale_64());
    tc0.timsk0.write(|w| w.ocie0a().set_bit());

    avr_device::interrupt::free(|cs| {
        MILLIS_COUNTER.borrow(cs).set(0);
    });
}

/// Milliseconds since [`millis_init`]
pub fn millis() -> u32 {
    avr_device::interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).get())
}

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter = MILLIS_COUNTER.borrow(cs);
        counter.set(counter.get().wrapping_add(1));
    })
}

/// The TC0 millisecond counter as a [`Millis`] source
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Millis for SystemClock {
    fn millis(&self) -> u32 {
        millis()
    }
}
