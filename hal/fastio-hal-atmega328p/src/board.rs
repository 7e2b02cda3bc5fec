//! ATmega328P board variants
//!
//! All boards in the Uno family share one pin table and differ only in CPU
//! clock, so the clock is a const parameter of a single board type.

use crate::registers::BLOCKS;

/// ATmega328P-based board running at `F_CPU` Hz
pub struct Atmega328p<const F_CPU: u32>;

/// Arduino Uno
pub type Uno = Atmega328p<16_000_000>;
/// Arduino Duemilanove
pub type Duemilanove = Atmega328p<16_000_000>;
/// Arduino Nano
pub type Nano = Atmega328p<16_000_000>;
/// Arduino Mini
pub type Mini = Atmega328p<16_000_000>;
/// Arduino Ethernet
pub type Ethernet = Atmega328p<16_000_000>;
/// Arduino BT
pub type Bt = Atmega328p<16_000_000>;
/// Arduino Uno WiFi Developer Edition
pub type UnoWifiDevEd = Atmega328p<16_000_000>;
/// Arduino Pro (5V, 16 MHz)
pub type Pro = Atmega328p<16_000_000>;
/// Arduino Pro (3.3V, 8 MHz)
pub type Pro8MHz = Atmega328p<8_000_000>;
/// Arduino Fio
pub type Fio = Atmega328p<8_000_000>;
/// Arduino LilyPad
pub type LilyPad = Atmega328p<8_000_000>;

#[cfg(target_arch = "avr")]
impl<const F_CPU: u32> fastio_hal::Board for Atmega328p<F_CPU> {
    const F_CPU: u32 = F_CPU;
    const BLOCKS: &'static [u16] = &BLOCKS;

    type Registers = crate::registers::Mmio;
    type Interrupts = crate::interrupt::Cpu;
    type Delay = crate::delay::DelayLoop;
}

impl<const F_CPU: u32> Atmega328p<F_CPU> {
    /// CPU clock frequency in Hz
    pub const F_CPU: u32 = F_CPU;

    /// GPIO register blocks
    pub const BLOCKS: [u16; 3] = BLOCKS;

    /// TC0 compare value for a 1 ms tick
    ///
    /// Referencing this on a board whose clock is too fast for an 8-bit
    /// compare at /64 fails to compile:
    ///
    /// ```compile_fail,E0080
    /// const COUNTS: u8 = fastio_hal_atmega328p::Atmega328p::<20_000_000>::TIMER0_COUNTS;
    /// ```
    pub const TIMER0_COUNTS: u8 = timer0_counts(F_CPU);
}

/// TC0 prescaler used for the millisecond tick
pub const TIMER0_PRESCALER: u32 = 64;

/// TC0 compare value giving a 1 ms period at `f_cpu` Hz
///
/// Panics if the count does not fit the 8-bit compare register, which is
/// the case above 16.384 MHz.
pub const fn timer0_counts(f_cpu: u32) -> u8 {
    let counts = f_cpu / TIMER0_PRESCALER / 1000 - 1;
    assert!(
        counts <= u8::MAX as u32,
        "CPU clock too fast for a 1 ms TC0 tick at /64"
    );
    counts as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_clocks() {
        assert_eq!(Uno::F_CPU, 16_000_000);
        assert_eq!(Nano::F_CPU, 16_000_000);
        assert_eq!(LilyPad::F_CPU, 8_000_000);
        assert_eq!(Pro8MHz::F_CPU, 8_000_000);
    }

    #[test]
    fn test_board_blocks() {
        assert_eq!(Uno::BLOCKS, [0x23, 0x26, 0x29]);
    }

    #[test]
    fn test_timer0_counts() {
        assert_eq!(Uno::TIMER0_COUNTS, 249);
        assert_eq!(LilyPad::TIMER0_COUNTS, 124);
        // Upper limit of the 8-bit compare register
        assert_eq!(timer0_counts(16_384_000), 255);
    }

    #[test]
    #[should_panic(expected = "too fast")]
    fn test_timer0_counts_rejects_fast_clock() {
        timer0_counts(20_000_000);
    }
}
