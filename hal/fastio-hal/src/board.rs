//! Board variant selection
//!
//! A board is chosen once, as a type parameter, and carries everything the
//! pin layer needs to know about the hardware: the CPU clock, which register
//! blocks exist, and how to touch registers and interrupts.

use crate::{BusyWait, InterruptControl, RegisterSpace};

/// A board variant
///
/// Implemented by a zero-sized marker type per board family.
pub trait Board {
    /// CPU clock frequency in Hz
    const F_CPU: u32;

    /// Base addresses of every GPIO register block on this board
    ///
    /// A pin identifier is only accepted if its base address is listed here.
    const BLOCKS: &'static [u16];

    /// Register access
    type Registers: RegisterSpace;

    /// Interrupt control
    type Interrupts: InterruptControl;

    /// Calibrated busy-wait loop
    type Delay: BusyWait;
}

/// Check whether `base` is one of `blocks`
///
/// Usable in constant evaluation, which is how pin identifiers are validated.
pub const fn block_exists(blocks: &[u16], base: u16) -> bool {
    let mut i = 0;
    while i < blocks.len() {
        if blocks[i] == base {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_exists() {
        let blocks = [0x23, 0x26, 0x29];
        assert!(block_exists(&blocks, 0x23));
        assert!(block_exists(&blocks, 0x29));
        assert!(!block_exists(&blocks, 0x24));
        assert!(!block_exists(&[], 0x23));
    }

    #[test]
    fn test_block_exists_const() {
        const FOUND: bool = block_exists(&[0x100, 0x103], 0x103);
        assert!(FOUND);
    }
}
