//! `korri-delay` library: a single-shot delay timer (`arm` / `cancel` /
//! `is_running` / `remaining_time`) layered over an injected host scheduler,
//! for `no_std` targets with an allocator.
//!
//! The host capabilities (register a callback after a delay, cancel it, read
//! the time) are traits, so the same timer runs on top of a deterministic
//! virtual-time host in tests and on top of an async runtime in firmware.
#![no_std]
//==================================================================================
extern crate alloc;
//==================================================================================
/// Shared timer vocabulary: state enum, delay limits and conversions.
pub mod core;
/// Errors raised by the checked delay conversions.
pub mod error;
/// Host capabilities consumed by the timer and the hosts shipped with the crate.
pub mod host;
/// The delay timer itself.
pub mod timer;
//==================================================================================
pub use crate::timer::DelayTimer;
