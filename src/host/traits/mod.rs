//! Abstraction traits describing what the timer needs from its host
//! (scheduler, clock) and what an async host needs from its runtime (delay).
pub mod async_delay;
pub mod clock;
pub mod scheduler;
