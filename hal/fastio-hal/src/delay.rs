//! Cycle-counted busy waiting

/// Tight counted loop with a fixed cost per iteration
///
/// Used for delays that must be accurate to a few CPU cycles, which rules out
/// timer-based waiting.
pub trait BusyWait {
    /// CPU cycles consumed by one loop iteration
    const CYCLES_PER_LOOP: u32;

    /// Spin for `count` iterations
    ///
    /// A count of zero returns immediately.
    fn spin(count: u16);
}
