//! Single-shot delayed-callback registration, the primitive every
//! event-driven host exposes in one form or another.
use crate::host::Task;

/// Contract to register a callback after a delay and to cancel it.
///
/// Implementations must invoke a registered task at most once, never earlier
/// than `delay_ms` after registration, and never after a `cancel` that
/// happened strictly before dispatch. Cancelling a handle whose task already
/// ran, or was already cancelled, must be a no-op.
pub trait Scheduler {
    /// Opaque token identifying one registration.
    type Handle;

    /// Register `task` to run `delay_ms` milliseconds from now.
    fn schedule(&mut self, delay_ms: u32, task: Task) -> Self::Handle;

    /// Release a registration so its task never runs.
    fn cancel(&mut self, handle: Self::Handle);
}
