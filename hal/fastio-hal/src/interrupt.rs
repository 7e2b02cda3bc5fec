//! Global interrupt control

/// Enable and disable interrupt servicing for the whole CPU
///
/// There is no save/restore of the previous state: `enable` turns interrupts
/// on regardless of what they were before `disable`.
pub trait InterruptControl {
    /// Stop servicing interrupts
    fn disable();

    /// Resume servicing interrupts
    ///
    /// # Safety
    ///
    /// Must not be called inside a region that relies on interrupts staying
    /// disabled, such as an outer critical section.
    unsafe fn enable();
}
