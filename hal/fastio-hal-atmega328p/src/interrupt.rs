//! Global interrupt control for AVR

use fastio_hal::InterruptControl;

/// The CPU's global interrupt flag (SREG.I)
pub struct Cpu;

impl InterruptControl for Cpu {
    #[inline(always)]
    fn disable() {
        avr_device::interrupt::disable();
    }

    #[inline(always)]
    unsafe fn enable() {
        // SAFETY: forwarded to the caller
        unsafe { avr_device::interrupt::enable() }
    }
}
