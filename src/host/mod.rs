//! Host side of the timer: the capability traits it consumes and the hosts
//! shipped with the crate.
//!
//! - [`manual::ManualScheduler`]: virtual time advanced by hand, fully deterministic.
//! - [`local::LocalScheduler`]: async host driven by any [`traits::async_delay::AsyncDelay`].
//! - `embassy` (feature `embassy`): clock and delay backed by `embassy-time`.
#[cfg(feature = "embassy")]
pub mod embassy;
pub mod local;
pub mod manual;
pub mod traits;

use alloc::boxed::Box;

/// Type-erased callback stored by a host until it is dispatched.
pub type Task = Box<dyn FnOnce() + 'static>;
