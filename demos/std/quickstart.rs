//! # Quickstart Example
//!
//! Minimal example demonstrating korri-delay:
//! - Arm, query and cancel a timer on the virtual-time host
//! - Run the same timer on an async runtime through `LocalScheduler`
//!
//! This example uses `std` and tokio for a quick trial run.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use std::cell::Cell;
use std::rc::Rc;

use korri_delay::host::local::LocalScheduler;
use korri_delay::host::manual::ManualScheduler;
use korri_delay::host::traits::{async_delay::AsyncDelay, clock::Clock};
use korri_delay::DelayTimer;

/// Clock over tokio's monotonic time.
#[derive(Clone, Copy)]
struct TokioClock(tokio::time::Instant);

impl Clock for TokioClock {
    fn now_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

struct TokioDelay;

impl AsyncDelay for TokioDelay {
    async fn delay_ms(&mut self, millis: u32) {
        tokio::time::sleep(std::time::Duration::from_millis(millis as u64)).await;
    }
}

fn manual_host() {
    println!("1. Virtual-time host");

    let host = ManualScheduler::new();
    let mut timer = DelayTimer::new(host.clone(), host.clone());

    timer.arm(|| println!("   -> first callback (never printed)"), 500);
    println!("   armed for 500 ms, remaining: {} ms", timer.remaining_time());

    host.advance(200);
    println!("   after 200 ms, remaining: {} ms", timer.remaining_time());

    timer.arm(|| println!("   -> second callback fired"), 100);
    println!("   re-armed for 100 ms (first callback superseded)");

    host.advance(100);
    println!("   running: {}\n", timer.is_running());
}

async fn async_host() {
    println!("2. Async host on tokio");

    let host = LocalScheduler::new(TokioClock(tokio::time::Instant::now()));
    let mut timer = DelayTimer::new(host.clone(), host.clone());
    let fired = Rc::new(Cell::new(false));

    tokio::select! {
        _ = host.drive(TokioDelay) => unreachable!(),
        _ = async {
            let flag = fired.clone();
            timer.arm(move || flag.set(true), 50);
            println!("   armed for 50 ms, state: {:?}", timer.state());

            tokio::time::sleep(std::time::Duration::from_millis(80)).await;
            println!("   fired: {}, state: {:?}", fired.get(), timer.state());

            timer.arm(|| println!("   -> cancelled callback (never printed)"), 50);
            timer.cancel();
            tokio::time::sleep(std::time::Duration::from_millis(80)).await;
            println!("   cancelled timer stayed silent, pending: {}", host.pending());
        } => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== korri-delay Quickstart ===\n");
    manual_host();
    async_host().await;
}
