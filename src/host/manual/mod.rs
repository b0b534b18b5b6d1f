//! Deterministic host running on virtual time.
//!
//! Nothing happens until the owner moves the clock with [`ManualScheduler::advance`],
//! [`ManualScheduler::advance_to`] or [`ManualScheduler::fire_next`]; every due
//! task then runs in due order (registration order on ties), with the virtual
//! clock set to the task's due time while it runs. Cloning the scheduler yields
//! another handle on the same host, so one clone can be handed to a timer while
//! the test keeps the other to drive time.
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::host::traits::{clock::Clock, scheduler::Scheduler};
use crate::host::Task;

/// Registration token returned by [`ManualScheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ManualHandle(u64);

struct Entry {
    id: u64,
    due_ms: u64,
    task: Task,
}

#[derive(Default)]
struct ManualHost {
    now_ms: u64,
    next_id: u64,
    queue: Vec<Entry>,
}

impl ManualHost {
    /// Remove the earliest task due at or before `limit_ms` and move the clock to it.
    fn pop_due(&mut self, limit_ms: u64) -> Option<Task> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= limit_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.id))
            .map(|(index, _)| index)?;
        let entry = self.queue.swap_remove(index);
        self.now_ms = self.now_ms.max(entry.due_ms);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "manual host: firing task {=u64} at {=u64} ms",
            entry.id,
            self.now_ms
        );

        Some(entry.task)
    }
}

/// Virtual-time scheduler and clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    host: Rc<RefCell<ManualHost>>,
}

impl ManualScheduler {
    /// Create a host whose virtual clock reads 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered tasks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.host.borrow().queue.len()
    }

    /// Move the clock forward by `millis` and run every task that became due.
    ///
    /// Returns the number of tasks that ran. Tasks registered by a running
    /// task are run within the same call when they fall due before the target.
    pub fn advance(&self, millis: u64) -> usize {
        let target_ms = self.host.borrow().now_ms.saturating_add(millis);
        self.advance_to(target_ms)
    }

    /// Move the clock to `target_ms` (never backwards) and run every task due
    /// at or before it. Returns the number of tasks that ran.
    pub fn advance_to(&self, target_ms: u64) -> usize {
        let mut fired = 0;
        // The borrow is released before the task runs so it can reschedule.
        while let Some(task) = self.take_due(target_ms) {
            task();
            fired += 1;
        }
        let mut host = self.host.borrow_mut();
        host.now_ms = host.now_ms.max(target_ms);
        fired
    }

    /// Jump to the earliest pending task and run it.
    ///
    /// Returns `false` when nothing is pending.
    pub fn fire_next(&self) -> bool {
        match self.take_due(u64::MAX) {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    fn take_due(&self, limit_ms: u64) -> Option<Task> {
        self.host.borrow_mut().pop_due(limit_ms)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&mut self, delay_ms: u32, task: Task) -> ManualHandle {
        let mut host = self.host.borrow_mut();
        let id = host.next_id;
        host.next_id += 1;
        let due_ms = host.now_ms.saturating_add(delay_ms as u64);
        host.queue.push(Entry { id, due_ms, task });
        ManualHandle(id)
    }

    fn cancel(&mut self, handle: ManualHandle) {
        let mut host = self.host.borrow_mut();
        host.queue.retain(|entry| entry.id != handle.0);
    }
}

impl Clock for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.host.borrow().now_ms
    }
}

#[cfg(test)]
mod tests;
