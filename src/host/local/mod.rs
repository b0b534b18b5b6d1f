//! Async callback host for single-threaded executors.
//!
//! [`LocalScheduler`] keeps registered tasks in a queue ordered by deadline.
//! The [`LocalScheduler::drive`] future is the dispatch loop: it runs every
//! due task, then sleeps on the runtime's [`AsyncDelay`] until the earliest
//! deadline, or until a new registration wakes it up, whichever comes first.
//!
//! Everything stays on one thread: the queue lives behind an `Rc` and the
//! wake-up signal uses [`NoopRawMutex`]. No task runs while the queue is
//! borrowed, so tasks are free to register or cancel other tasks.
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use embassy_sync::{blocking_mutex::raw::NoopRawMutex, signal::Signal};
use futures_util::{
    future::{select, Either},
    pin_mut,
};

use crate::host::traits::{async_delay::AsyncDelay, clock::Clock, scheduler::Scheduler};
use crate::host::Task;

/// Registration token returned by [`LocalScheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalHandle(u64);

struct Entry {
    id: u64,
    deadline_ms: u64,
    task: Task,
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Queue {
    fn earliest(&self) -> Option<(usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| (entry.deadline_ms, entry.id))
    }
}

struct LocalHost<C> {
    clock: C,
    queue: RefCell<Queue>,
    wake: Signal<NoopRawMutex, ()>,
}

/// Single-threaded async scheduler built on a [`Clock`] and an [`AsyncDelay`].
pub struct LocalScheduler<C: Clock> {
    host: Rc<LocalHost<C>>,
}

impl<C: Clock> Clone for LocalScheduler<C> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
        }
    }
}

impl<C: Clock> LocalScheduler<C> {
    /// Build an empty host reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            host: Rc::new(LocalHost {
                clock,
                queue: RefCell::new(Queue::default()),
                wake: Signal::new(),
            }),
        }
    }

    /// Number of registered tasks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.host.queue.borrow().entries.len()
    }

    /// Dispatch loop; never completes.
    ///
    /// Must be polled by the executor for callbacks to run (spawn it, or
    /// `select` it against the application future). A task registered while
    /// a pass is running waits for the next pass, and the loop hands control
    /// back to the executor before that pass, even for zero delays.
    pub async fn drive<D: AsyncDelay>(&self, mut delay: D) {
        loop {
            self.fire_due();

            match self.next_wait_ms() {
                Some(0) => YieldNow::default().await,
                Some(wait_ms) => {
                    let sleep = delay.delay_ms(wait_ms);
                    let woken = self.host.wake.wait();
                    pin_mut!(sleep);
                    pin_mut!(woken);

                    match select(sleep, woken).await {
                        Either::Left(_) => {
                            #[cfg(feature = "defmt")]
                            defmt::trace!("local host: deadline reached after {=u32} ms", wait_ms);
                        }
                        Either::Right(_) => {
                            #[cfg(feature = "defmt")]
                            defmt::trace!("local host: queue changed, recomputing deadline");
                        }
                    }
                }
                None => self.host.wake.wait().await,
            }
        }
    }

    /// Run, earliest first, every task that was registered before the pass
    /// started and whose deadline is at or before the pass start time.
    fn fire_due(&self) {
        let now_ms = self.host.clock.now_ms();
        let id_limit = self.host.queue.borrow().next_id;
        while let Some(task) = self.take_due(now_ms, id_limit) {
            task();
        }
    }

    fn take_due(&self, now_ms: u64, id_limit: u64) -> Option<Task> {
        let mut queue = self.host.queue.borrow_mut();
        let (index, _) = queue
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.id < id_limit && entry.deadline_ms <= now_ms)
            .min_by_key(|(_, entry)| (entry.deadline_ms, entry.id))?;
        let entry = queue.entries.swap_remove(index);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "local host: firing task {=u64} (deadline {=u64} ms, now {=u64} ms)",
            entry.id,
            entry.deadline_ms,
            now_ms
        );

        Some(entry.task)
    }

    /// Milliseconds until the earliest deadline, `None` when the queue is empty.
    fn next_wait_ms(&self) -> Option<u32> {
        let queue = self.host.queue.borrow();
        let (_, entry) = queue.earliest()?;
        let wait_ms = entry
            .deadline_ms
            .saturating_sub(self.host.clock.now_ms())
            .min(u32::MAX as u64);
        Some(wait_ms as u32)
    }
}

/// Future returning `Pending` once, so the executor can poll other futures.
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

impl<C: Clock> Scheduler for LocalScheduler<C> {
    type Handle = LocalHandle;

    fn schedule(&mut self, delay_ms: u32, task: Task) -> LocalHandle {
        let id = {
            let mut queue = self.host.queue.borrow_mut();
            let id = queue.next_id;
            queue.next_id += 1;
            let deadline_ms = self.host.clock.now_ms().saturating_add(delay_ms as u64);
            queue.entries.push(Entry {
                id,
                deadline_ms,
                task,
            });
            id
        };
        self.host.wake.signal(());
        LocalHandle(id)
    }

    fn cancel(&mut self, handle: LocalHandle) {
        let removed = {
            let mut queue = self.host.queue.borrow_mut();
            let before = queue.entries.len();
            queue.entries.retain(|entry| entry.id != handle.0);
            before != queue.entries.len()
        };
        if removed {
            self.host.wake.signal(());
        }
    }
}

impl<C: Clock> Clock for LocalScheduler<C> {
    fn now_ms(&self) -> u64 {
        self.host.clock.now_ms()
    }
}
