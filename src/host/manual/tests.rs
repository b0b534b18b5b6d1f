//! Unit tests for the virtual-time host.
use super::*;
use alloc::boxed::Box;
use alloc::vec;
use core::cell::Cell;

/// Task pushing `tag` into a shared log.
fn record(log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Task {
    let log = log.clone();
    Box::new(move || log.borrow_mut().push(tag))
}

#[test]
/// Tasks run in due order, registration order breaking ties.
fn test_fires_in_due_order() {
    let mut host = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    host.schedule(30, record(&log, 3));
    host.schedule(10, record(&log, 1));
    host.schedule(20, record(&log, 2));
    host.schedule(10, record(&log, 11));

    assert_eq!(host.advance(25), 3);
    assert_eq!(*log.borrow(), vec![1, 11, 2]);
    assert_eq!(host.now_ms(), 25);

    assert_eq!(host.advance(100), 1);
    assert_eq!(*log.borrow(), vec![1, 11, 2, 3]);
    assert_eq!(host.pending(), 0);
}

#[test]
/// Nothing runs before its due time.
fn test_not_before_due() {
    let mut host = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    host.schedule(50, record(&log, 1));

    assert_eq!(host.advance(49), 0);
    assert!(log.borrow().is_empty());
    assert_eq!(host.advance(1), 1);
    assert_eq!(*log.borrow(), vec![1]);
}

#[test]
/// Cancelled tasks never run; cancelling twice or after firing is harmless.
fn test_cancel() {
    let mut host = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = host.schedule(10, record(&log, 1));
    let second = host.schedule(10, record(&log, 2));
    host.cancel(first);
    host.cancel(first);
    assert_eq!(host.pending(), 1);

    assert_eq!(host.advance(10), 1);
    host.cancel(second);
    assert_eq!(*log.borrow(), vec![2]);
}

#[test]
/// The clock reads the task's due time while the task runs.
fn test_clock_inside_task() {
    let mut host = ManualScheduler::new();
    let seen = Rc::new(Cell::new(0u64));

    let clock = host.clone();
    let seen_in_task = seen.clone();
    host.schedule(
        40,
        Box::new(move || seen_in_task.set(clock.now_ms())),
    );

    host.advance(100);
    assert_eq!(seen.get(), 40);
    assert_eq!(host.now_ms(), 100);
}

#[test]
/// A task may register another one; it runs in the same advance when due.
fn test_reentrant_schedule() {
    let mut host = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut inner_host = host.clone();
    let inner_log = log.clone();
    host.schedule(
        10,
        Box::new(move || {
            inner_log.borrow_mut().push(1);
            inner_host.schedule(5, record(&inner_log, 2));
            inner_host.schedule(50, record(&inner_log, 3));
        }),
    );

    assert_eq!(host.advance(20), 2);
    assert_eq!(*log.borrow(), vec![1, 2]);
    assert_eq!(host.pending(), 1);
}

#[test]
/// `fire_next` jumps straight to the earliest task.
fn test_fire_next() {
    let mut host = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    assert!(!host.fire_next());

    host.schedule(1_000, record(&log, 1));
    host.schedule(0, record(&log, 0));

    assert!(host.fire_next());
    assert_eq!(host.now_ms(), 0);
    assert!(host.fire_next());
    assert_eq!(host.now_ms(), 1_000);
    assert_eq!(*log.borrow(), vec![0, 1]);
}

#[test]
/// Time never moves backwards.
fn test_advance_to_is_monotonic() {
    let host = ManualScheduler::new();
    host.advance_to(500);
    host.advance_to(100);
    assert_eq!(host.now_ms(), 500);
}
