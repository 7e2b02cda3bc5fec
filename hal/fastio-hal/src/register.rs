//! Memory-mapped register access

/// Byte-wide memory-mapped register space
///
/// Methods are associated functions so the implementing type is never
/// instantiated; a call resolves at compile time to a single memory
/// operation.
pub trait RegisterSpace {
    /// Read the 8-bit register at `addr`
    ///
    /// Every call must perform exactly one volatile load that is neither
    /// elided nor reordered across other register accesses.
    ///
    /// # Safety
    ///
    /// `addr` must be the address of a readable register on this device.
    unsafe fn read(addr: u16) -> u8;

    /// Write `value` to the 8-bit register at `addr`
    ///
    /// Every call must perform exactly one volatile store.
    ///
    /// # Safety
    ///
    /// `addr` must be the address of a writable register on this device,
    /// and the write must not break any invariant held by other code that
    /// owns the same register bits.
    unsafe fn write(addr: u16, value: u8);

    /// Read-modify-write the register at `addr`
    ///
    /// # Safety
    ///
    /// Same requirements as [`RegisterSpace::read`] and [`RegisterSpace::write`].
    #[inline(always)]
    unsafe fn modify(addr: u16, f: impl FnOnce(u8) -> u8) {
        // SAFETY: forwarded to the caller
        unsafe {
            let value = Self::read(addr);
            Self::write(addr, f(value));
        }
    }
}
