//! Vocabulary shared by the timer and the hosts: the two-state machine and
//! the delay range accepted when arming.
use crate::error::DelayError;

/// Longest delay accepted by [`DelayTimer::arm`](crate::timer::DelayTimer::arm), in milliseconds.
///
/// Matches the signed 32-bit limit of the classic host `setTimeout` facility
/// (about 24.8 days). Longer requests are clamped by `arm` and rejected by
/// `try_arm`.
pub const MAX_DELAY_MS: u32 = i32::MAX as u32;

/// Observable state of a [`DelayTimer`](crate::timer::DelayTimer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// No registration is pending.
    #[default]
    Idle,
    /// A callback is registered with the host and has not fired yet.
    Armed,
}

impl TimerState {
    /// `true` for [`TimerState::Armed`].
    #[inline]
    pub fn is_armed(self) -> bool {
        matches!(self, TimerState::Armed)
    }
}

/// Validate a signed delay coming from untrusted input.
///
/// # Errors
///
/// - [`DelayError::Negative`] for `millis < 0`
/// - [`DelayError::TooLong`] for `millis > MAX_DELAY_MS`
pub fn checked_delay_ms(millis: i64) -> Result<u32, DelayError> {
    if millis < 0 {
        return Err(DelayError::Negative { millis });
    }
    if millis > MAX_DELAY_MS as i64 {
        return Err(DelayError::TooLong {
            millis,
            max: MAX_DELAY_MS,
        });
    }
    Ok(millis as u32)
}

/// Saturating counterpart of [`checked_delay_ms`]: negative delays become 0,
/// oversized ones become [`MAX_DELAY_MS`].
#[inline]
pub fn clamp_delay_ms(millis: i64) -> u32 {
    millis.clamp(0, MAX_DELAY_MS as i64) as u32
}
