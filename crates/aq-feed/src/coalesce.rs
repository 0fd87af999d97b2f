//! Latest-wins single-value mailbox.
//!
//! A producer that outpaces its consumer overwrites the pending value
//! instead of queueing behind it: at most one value waits at any time, and
//! it is always the newest.  Values that are overwritten are counted.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

struct SlotState<T> {
    value:    Option<T>,
    closed:   bool,
    replaced: u64,
}

pub struct LatestSlot<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState { value: None, closed: false, replaced: 0 }),
            ready: Condvar::new(),
        }
    }

    /// Store `value`, replacing any value still pending.
    ///
    /// Returns `false` (and drops `value`) if the slot is closed.
    pub fn put(&self, value: T) -> bool {
        let mut state = self.state.lock();
        if state.closed {
            return false;
        }
        if state.value.replace(value).is_some() {
            state.replaced += 1;
        }
        self.ready.notify_one();
        true
    }

    /// Take the pending value without blocking.
    pub fn take(&self) -> Option<T> {
        self.state.lock().value.take()
    }

    /// Block until a value is pending and take it.
    ///
    /// Returns `None` once the slot is closed and drained.
    pub fn wait(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(value) = state.value.take() {
                return Some(value);
            }
            if state.closed {
                return None;
            }
            self.ready.wait(&mut state);
        }
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.value.is_none() && !state.closed {
            if self.ready.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.value.take()
    }

    /// Refuse further values and wake every waiter.  A value already
    /// pending can still be taken.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().value.is_some()
    }

    /// How many values were overwritten before anyone took them.
    pub fn replaced(&self) -> u64 {
        self.state.lock().replaced
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
