//! Memory-mapped register access for the ATmega328P
//!
//! GPIO registers live in the low I/O space, which AVR also maps into the
//! data address space at offset 0x20. Pin identifiers use the data-space
//! address, so a plain volatile pointer access reaches the register; with a
//! constant address the compiler lowers it to `in`/`out`/`sbi`/`cbi`.

use fastio_hal::RegisterSpace;

/// Port B register block (PINB, DDRB, PORTB)
pub const PORTB_BASE: u16 = 0x23;
/// Port C register block (PINC, DDRC, PORTC)
pub const PORTC_BASE: u16 = 0x26;
/// Port D register block (PIND, DDRD, PORTD)
pub const PORTD_BASE: u16 = 0x29;

/// All GPIO register blocks on the ATmega328P
pub const BLOCKS: [u16; 3] = [PORTB_BASE, PORTC_BASE, PORTD_BASE];

/// Volatile access to the AVR data address space
pub struct Mmio;

impl RegisterSpace for Mmio {
    #[inline(always)]
    unsafe fn read(addr: u16) -> u8 {
        // SAFETY: the caller guarantees `addr` is a readable register
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline(always)]
    unsafe fn write(addr: u16, value: u8) {
        // SAFETY: the caller guarantees `addr` is a writable register
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }
}
