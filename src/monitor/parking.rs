use std::fmt;
use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};

use super::{Monitor, WaitStatus};

/// [`Monitor`] backed by `parking_lot::Mutex` and `parking_lot::Condvar`.
///
/// No poisoning; otherwise interchangeable with [`StdMonitor`](super::StdMonitor).
#[derive(Default)]
pub struct ParkingLotMonitor<T> {
    value: Mutex<T>,
    cond: Condvar,
}

impl<T: Send> Monitor<T> for ParkingLotMonitor<T> {
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
        self.value.lock()
    }

    fn wait<'a>(&'a self, mut guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        self.cond.wait(&mut guard);
        guard
    }

    fn wait_timeout<'a>(
        &'a self,
        mut guard: MutexGuard<'a, T>,
        timeout: Duration,
    ) -> (MutexGuard<'a, T>, WaitStatus) {
        let status = if self.cond.wait_for(&mut guard, timeout).timed_out() {
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

impl<T: fmt::Debug> fmt::Debug for ParkingLotMonitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingLotMonitor")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_wait_returns_after_notify() {
        let mon = Arc::new(ParkingLotMonitor::new(0u32));
        let setter = {
            let mon = Arc::clone(&mon);
            thread::spawn(move || {
                *mon.acquire() = 3;
                mon.notify();
            })
        };

        let mut guard = mon.acquire();
        while *guard != 3 {
            guard = mon.wait(guard);
        }
        drop(guard);
        setter.join().unwrap();
    }

    #[test]
    fn test_wait_timeout_without_notify_times_out() {
        let mon = ParkingLotMonitor::new(0u32);
        let mut guard = mon.acquire();
        let mut status = WaitStatus::Notified;
        for _ in 0..100 {
            let (next, st) = mon.wait_timeout(guard, Duration::from_millis(5));
            guard = next;
            status = st;
            if status.timed_out() {
                break;
            }
        }
        assert_eq!(status, WaitStatus::TimedOut);
    }
}
