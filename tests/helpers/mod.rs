/// Test doubles plugging tokio's (pausable) clock into the host traits.
use korri_delay::host::traits::{async_delay::AsyncDelay, clock::Clock};
use tokio::time::{sleep, Duration, Instant};

#[derive(Clone, Copy)]
#[allow(dead_code)]
/// Clock counting milliseconds since its creation on the tokio clock.
pub struct MockClock {
    origin: Instant,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[allow(dead_code)]
/// Delay based on `tokio::time::sleep`.
pub struct MockDelay;

impl AsyncDelay for MockDelay {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}
