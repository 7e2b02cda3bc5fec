//! fastio demo firmware
//!
//! Toggles the LED and fires a timed pulse on the trigger pin each time the
//! debounced button is pressed. Board variant, pins, debounce interval and
//! pulse width come from board.toml at build time.

#![no_std]
#![no_main]

use fastio_core::{Button, Edge, Gpio};
use fastio_hal::BusyWait;
use fastio_hal_atmega328p::delay::DelayLoop;
use fastio_hal_atmega328p::millis::{millis_init, SystemClock};

mod board_config {
    include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
}

use board_config::{Board, BUTTON, BUTTON_PIN, LED_PIN, PULSE, TRIGGER_PIN};

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    avr_device::interrupt::disable();

    // Fast blink forever
    let mut led = Gpio::<Board, LED_PIN>::new();
    led.output();
    loop {
        led.toggle();
        for _ in 0..8 {
            DelayLoop::spin(u16::MAX);
        }
    }
}

#[avr_device::entry]
fn main() -> ! {
    let dp = avr_device::atmega328p::Peripherals::take().unwrap();

    millis_init::<Board>(dp.TC0);
    // SAFETY: nothing is in a critical section yet
    unsafe { avr_device::interrupt::enable() };

    let mut led = Gpio::<Board, LED_PIN>::new();
    led.output();
    led.low();

    let mut trigger = Gpio::<Board, TRIGGER_PIN>::new();
    trigger.output();
    trigger.low();

    let mut button = Button::from_config(Gpio::<Board, BUTTON_PIN>::new(), SystemClock, &BUTTON);

    loop {
        if let Some(Edge::Pressed) = button.poll() {
            led.toggle();
            trigger.pulse(PULSE.width_us);
        }
    }
}
