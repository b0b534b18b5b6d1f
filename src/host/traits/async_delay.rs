//! Asynchronous delay abstraction: the only primitive an async runtime has to
//! provide for [`LocalScheduler`](crate::host::local::LocalScheduler) to act
//! as a callback host.

/// Async "wait N milliseconds" primitive.
pub trait AsyncDelay {
    /// Asynchronously wait for `millis` milliseconds.
    ///
    /// [`LocalScheduler::drive`](crate::host::local::LocalScheduler::drive)
    /// races the returned future against its wake-up signal and drops it
    /// unfinished whenever the queue changes first, so dropping it must
    /// release whatever the wait holds. `millis` is never 0 there.
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + 'a;
}
