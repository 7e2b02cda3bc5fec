//! Millisecond time source

/// Monotonic millisecond counter
///
/// The counter wraps at `u32::MAX`; consumers must compare timestamps with
/// wrapping subtraction.
pub trait Millis {
    /// Milliseconds since the clock was started
    fn millis(&self) -> u32;
}

impl<T: Millis + ?Sized> Millis for &T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}
