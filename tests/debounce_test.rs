//! End-to-end scenario on the virtual-time host: a keystroke debouncer that
//! re-arms one timer on every input and commits once input goes quiet.
use std::cell::RefCell;
use std::rc::Rc;

use korri_delay::core::TimerState;
use korri_delay::host::manual::ManualScheduler;
use korri_delay::DelayTimer;

const QUIET_MS: u32 = 300;

struct Debouncer {
    timer: DelayTimer<ManualScheduler, ManualScheduler>,
    buffer: Rc<RefCell<String>>,
    committed: Rc<RefCell<Vec<String>>>,
}

impl Debouncer {
    fn new(host: &ManualScheduler) -> Self {
        Self {
            timer: DelayTimer::new(host.clone(), host.clone()),
            buffer: Rc::new(RefCell::new(String::new())),
            committed: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn key(&mut self, c: char) {
        self.buffer.borrow_mut().push(c);
        let buffer = self.buffer.clone();
        let committed = self.committed.clone();
        self.timer.arm(
            move || {
                let text = std::mem::take(&mut *buffer.borrow_mut());
                committed.borrow_mut().push(text);
            },
            QUIET_MS,
        );
    }
}

#[test]
fn debouncer_commits_after_quiet_period() {
    let host = ManualScheduler::new();
    let mut debouncer = Debouncer::new(&host);

    for c in "hello".chars() {
        debouncer.key(c);
        host.advance(100);
    }
    assert!(debouncer.committed.borrow().is_empty());
    assert_eq!(debouncer.timer.state(), TimerState::Armed);
    assert_eq!(debouncer.timer.remaining_time(), QUIET_MS - 100);
    assert_eq!(host.pending(), 1);

    host.advance(QUIET_MS as u64);
    assert_eq!(*debouncer.committed.borrow(), vec!["hello".to_string()]);
    assert_eq!(debouncer.timer.state(), TimerState::Idle);

    debouncer.key('!');
    host.advance(QUIET_MS as u64);
    assert_eq!(
        *debouncer.committed.borrow(),
        vec!["hello".to_string(), "!".to_string()]
    );
}

#[test]
fn dropping_debouncer_discards_pending_commit() {
    let host = ManualScheduler::new();
    let committed = {
        let mut debouncer = Debouncer::new(&host);
        debouncer.key('x');
        debouncer.committed.clone()
    };
    assert_eq!(host.pending(), 0);
    host.advance(QUIET_MS as u64);
    assert!(committed.borrow().is_empty());
}
