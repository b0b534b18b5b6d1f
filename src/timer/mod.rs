//! Single-shot delay timer.
//!
//! [`DelayTimer`] wraps a host [`Scheduler`] so that at most one callback is
//! registered per timer at any time, and keeps enough bookkeeping to answer
//! "is it running?" and "how long until it fires?".
//!
//! ```rust,ignore
//! use korri_delay::{host::manual::ManualScheduler, DelayTimer};
//!
//! let host = ManualScheduler::new();
//! let mut timer = DelayTimer::new(host.clone(), host.clone());
//!
//! timer.arm(|| println!("fired"), 100);
//! assert_eq!(timer.remaining_time(), 100);
//!
//! host.advance(100); // prints "fired"
//! assert!(!timer.is_running());
//! ```
use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;

use embassy_time::Duration;

use crate::core::{checked_delay_ms, clamp_delay_ms, TimerState};
use crate::error::DelayError;
use crate::host::traits::{clock::Clock, scheduler::Scheduler};

/// Running flag shared between the timer and the wrapper it registers.
///
/// `generation` identifies the arm that produced the registration, so a
/// wrapper dispatched after it was superseded or cancelled does nothing.
#[derive(Debug, Clone, Copy, Default)]
struct ArmState {
    generation: u32,
    running: bool,
}

/// Timer firing one callback after a delay, built on an injected host.
///
/// * `S` – host scheduler the callback is registered with.
/// * `C` – clock used to compute the remaining time.
///
/// Calls are expected from the thread that runs the host dispatch. Dropping
/// an armed timer cancels its pending registration.
pub struct DelayTimer<S: Scheduler, C: Clock> {
    scheduler: S,
    clock: C,
    handle: Option<S::Handle>,
    duration_ms: u32,
    start_ms: u64,
    arm_state: Rc<Cell<ArmState>>,
}

impl<S: Scheduler, C: Clock> DelayTimer<S, C> {
    /// Create an idle timer.
    pub fn new(scheduler: S, clock: C) -> Self {
        Self {
            scheduler,
            clock,
            handle: None,
            duration_ms: 0,
            start_ms: 0,
            arm_state: Rc::new(Cell::new(ArmState::default())),
        }
    }

    /// Run `callback` once, `delay_ms` milliseconds from now.
    ///
    /// A pending registration is cancelled first, so only the latest callback
    /// can fire. When the host dispatches the registration the timer turns
    /// idle before `callback` runs. Delays above [`MAX_DELAY_MS`](crate::core::MAX_DELAY_MS) are clamped.
    pub fn arm<F>(&mut self, callback: F, delay_ms: u32)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let delay_ms = clamp_delay_ms(i64::from(delay_ms));
        let generation = self.arm_state.get().generation.wrapping_add(1);
        self.arm_state.set(ArmState {
            generation,
            running: true,
        });
        self.start_ms = self.clock.now_ms();
        self.duration_ms = delay_ms;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "timer armed: generation {=u32}, {=u32} ms",
            generation,
            delay_ms
        );

        let arm_state = self.arm_state.clone();
        let wrapper = Box::new(move || {
            let current = arm_state.get();
            if !current.running || current.generation != generation {
                #[cfg(feature = "defmt")]
                defmt::trace!("stale dispatch ignored: generation {=u32}", generation);
                return;
            }
            arm_state.set(ArmState {
                generation,
                running: false,
            });

            #[cfg(feature = "defmt")]
            defmt::debug!("timer fired: generation {=u32}", generation);

            callback();
        });
        self.handle = Some(self.scheduler.schedule(delay_ms, wrapper));
    }

    /// Checked variant of [`arm`](Self::arm) for signed delays.
    ///
    /// # Errors
    ///
    /// Returns [`DelayError`] for negative delays or delays above
    /// [`MAX_DELAY_MS`](crate::core::MAX_DELAY_MS); the timer is left untouched in that case.
    pub fn try_arm<F>(&mut self, callback: F, millis: i64) -> Result<(), DelayError>
    where
        F: FnOnce() + 'static,
    {
        let delay_ms = checked_delay_ms(millis)?;
        self.arm(callback, delay_ms);
        Ok(())
    }

    /// Cancel the pending callback. No-op when the timer is idle.
    pub fn cancel(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let state = self.arm_state.get();
        // A fired registration is complete: its handle is simply dropped.
        if state.running {
            self.scheduler.cancel(handle);
            self.arm_state.set(ArmState {
                running: false,
                ..state
            });

            #[cfg(feature = "defmt")]
            defmt::debug!("timer cancelled: generation {=u32}", state.generation);
        }
    }

    /// `true` from `arm` until the callback fires or the timer is cancelled.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.arm_state.get().running
    }

    /// Current state of the timer.
    #[inline]
    pub fn state(&self) -> TimerState {
        if self.is_running() {
            TimerState::Armed
        } else {
            TimerState::Idle
        }
    }

    /// Estimated milliseconds before the callback fires, 0 when idle.
    ///
    /// Host dispatch latency is not accounted for, so this may read 0 for a
    /// short while before the callback actually runs.
    pub fn remaining_time(&self) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let elapsed_ms = self.clock.now_ms().saturating_sub(self.start_ms);
        (self.duration_ms as u64).saturating_sub(elapsed_ms) as u32
    }

    /// [`remaining_time`](Self::remaining_time) as a [`Duration`].
    #[inline]
    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.remaining_time() as u64)
    }
}

impl<S: Scheduler, C: Clock> Drop for DelayTimer<S, C> {
    fn drop(&mut self) {
        self.cancel();
    }
}
