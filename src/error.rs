//! Error definitions shared across library modules.
//!
//! Arming, cancelling and querying a timer never fail; errors only exist
//! where a delay coming from signed or untrusted input is validated.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons a requested delay cannot be used to arm a timer.
pub enum DelayError {
    /// The delay is below zero.
    #[error("Negative delay: {millis} ms")]
    Negative { millis: i64 },
    /// The delay exceeds the longest supported delay.
    #[error("Delay too long: {millis} ms (max {max} ms)")]
    TooLong { millis: i64, max: u32 },
}
