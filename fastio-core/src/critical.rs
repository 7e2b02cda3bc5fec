//! Interrupt-free critical sections
//!
//! The guard here does not save the interrupt flag. Entering disables
//! interrupts, leaving always enables them, even if they were disabled before
//! entry. It is therefore not reentrant: using it inside another
//! interrupt-disabled region ends that region early.
//!
//! Code that needs to nest should use a state-restoring primitive such as
//! `avr_device::interrupt::free` instead.

use core::marker::PhantomData;

use fastio_hal::InterruptControl;

/// Keeps interrupts disabled while alive
///
/// Neither `Send` nor `Sync`: the interrupt flag belongs to the executing CPU.
#[must_use = "interrupts are re-enabled as soon as the guard is dropped"]
pub struct InterruptGuard<I: InterruptControl> {
    _marker: PhantomData<(I, *const ())>,
}

impl<I: InterruptControl> InterruptGuard<I> {
    /// Disable interrupts until the returned guard is dropped
    #[inline(always)]
    pub fn new() -> Self {
        I::disable();
        Self {
            _marker: PhantomData,
        }
    }
}

impl<I: InterruptControl> Default for InterruptGuard<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: InterruptControl> Drop for InterruptGuard<I> {
    #[inline(always)]
    fn drop(&mut self) {
        // SAFETY: non-reentrant by contract; callers must not be inside
        // another interrupt-disabled region
        unsafe { I::enable() }
    }
}

/// Run `f` with interrupts disabled, then enable them unconditionally
#[inline(always)]
pub fn without_interrupts<I: InterruptControl, R>(f: impl FnOnce() -> R) -> R {
    let _guard = InterruptGuard::<I>::new();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{self, SimEvent, SimInterrupts};

    #[test]
    fn test_guard_disables_then_enables() {
        sim::reset();

        {
            let _guard = InterruptGuard::<SimInterrupts>::new();
            assert!(!sim::interrupts_enabled());
        }
        assert!(sim::interrupts_enabled());

        assert_eq!(
            sim::events(),
            [SimEvent::InterruptsDisabled, SimEvent::InterruptsEnabled]
        );
    }

    #[test]
    fn test_without_interrupts_returns_value() {
        sim::reset();

        let seen = without_interrupts::<SimInterrupts, _>(sim::interrupts_enabled);
        assert!(!seen);
        assert!(sim::interrupts_enabled());
    }

    #[test]
    fn test_nesting_enables_early() {
        sim::reset();

        without_interrupts::<SimInterrupts, _>(|| {
            without_interrupts::<SimInterrupts, _>(|| {});
            // Inner section has already turned interrupts back on
            assert!(sim::interrupts_enabled());
        });
        assert!(sim::interrupts_enabled());
    }
}
