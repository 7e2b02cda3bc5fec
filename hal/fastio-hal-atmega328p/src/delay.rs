//! Cycle-counted delay loop for AVR

use core::arch::asm;

use fastio_hal::BusyWait;

/// 16-bit countdown loop, 4 cycles per iteration
///
/// `sbiw` takes 2 cycles and a taken `brne` 2 more, matching avr-libc's
/// `_delay_loop_2`. The final, untaken branch costs one cycle less.
pub struct DelayLoop;

impl BusyWait for DelayLoop {
    const CYCLES_PER_LOOP: u32 = 4;

    #[inline(always)]
    fn spin(count: u16) {
        // Zero would wrap and spin 65536 times
        if count == 0 {
            return;
        }

        // SAFETY: touches only the scratch register pair holding `count`
        unsafe {
            asm!(
                "1:",
                "sbiw {count}, 1",
                "brne 1b",
                count = inout(reg_iw) count => _,
                options(nomem, nostack),
            );
        }
    }
}
