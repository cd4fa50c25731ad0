use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{Monitor, WaitStatus};

/// [`Monitor`] backed by `std::sync::Mutex` and `std::sync::Condvar`.
///
/// Poisoning is ignored: a panic elsewhere never leaves the protected value
/// half-written, because every critical section in this crate is a set of plain
/// field assignments.
#[derive(Default)]
pub struct StdMonitor<T> {
    value: Mutex<T>,
    cond: Condvar,
}

impl<T: Send> Monitor<T> for StdMonitor<T> {
    type Guard<'a>
        = MutexGuard<'a, T>
    where
        Self: 'a;

    fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            cond: Condvar::new(),
        }
    }

    fn acquire(&self) -> MutexGuard<'_, T> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&'a self, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        self.cond
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_timeout<'a>(
        &'a self,
        guard: MutexGuard<'a, T>,
        timeout: Duration,
    ) -> (MutexGuard<'a, T>, WaitStatus) {
        let (guard, res) = self
            .cond
            .wait_timeout(guard, timeout)
            .unwrap_or_else(PoisonError::into_inner);
        let status = if res.timed_out() {
            WaitStatus::TimedOut
        } else {
            WaitStatus::Notified
        };
        (guard, status)
    }

    fn notify(&self) {
        self.cond.notify_all();
    }
}

impl<T: fmt::Debug> fmt::Debug for StdMonitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdMonitor")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
