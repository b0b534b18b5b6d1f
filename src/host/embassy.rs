//! Host adapters backed by `embassy-time`. They need the time driver of the
//! target to be linked in, hence the `embassy` feature gate.
use embassy_time::{Instant, Timer};

use crate::host::traits::{async_delay::AsyncDelay, clock::Clock};

/// [`Clock`] reading `embassy_time::Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// [`AsyncDelay`] sleeping on `embassy_time::Timer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyDelay;

impl AsyncDelay for EmbassyDelay {
    async fn delay_ms(&mut self, millis: u32) {
        Timer::after_millis(millis as u64).await;
    }
}
