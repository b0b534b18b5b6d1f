//! Millisecond time source used for elapsed-time computations.

/// Monotonic-enough millisecond clock.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
