//! Monitor backends: one mutex + one condition variable guarding a value.
//!
//! The run-loop state machine in `core` is written once against the
//! [`Monitor`] trait; the threading runtime underneath is picked by a type parameter.
//!
//! ## Contents
//! - [`Monitor`] backend contract (acquire / wait / wait_timeout / notify)
//! - [`StdMonitor`] built on `std::sync::{Mutex, Condvar}` (default)
//! - `ParkingLotMonitor` built on `parking_lot` _(feature `parking_lot`)_
//!
//! ## Contract
//! ```text
//! acquire()            → scoped guard, released on every exit path
//! wait(guard)          → release + block + reacquire (no missed wakeup in between)
//! wait_timeout(g, d)   → same, gives up after `d` with WaitStatus::TimedOut
//! notify()             → wake every waiter; legal with or without the lock held
//! ```
//!
//! Waiters must re-check their predicate after every return from `wait`: wakeups may be
//! spurious or caused by an unrelated state change.

use std::ops::DerefMut;
use std::time::Duration;

mod standard;
pub use standard::StdMonitor;

#[cfg(feature = "parking_lot")]
mod parking;
#[cfg(feature = "parking_lot")]
pub use parking::ParkingLotMonitor;

/// Result of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// Woken by a notification (or spuriously) before the bound.
    Notified,
    /// The bound elapsed.
    TimedOut,
}

impl WaitStatus {
    #[inline]
    pub fn timed_out(self) -> bool {
        matches!(self, WaitStatus::TimedOut)
    }
}

/// Mutex + condition variable pair protecting a `T`.
///
/// Implementations must be drop-in equivalent: the state machine relies only on the
/// semantics documented on each method.
pub trait Monitor<T>: Send + Sync {
    /// Scoped lock; dropping it releases the mutex.
    type Guard<'a>: DerefMut<Target = T>
    where
        Self: 'a;

    /// Creates a monitor owning `value`.
    fn new(value: T) -> Self
    where
        Self: Sized;

    /// Blocks until the lock is held and returns the scoped guard.
    fn acquire(&self) -> Self::Guard<'_>;

    /// Atomically releases `guard`, blocks until notified, and reacquires the lock.
    fn wait<'a>(&'a self, guard: Self::Guard<'a>) -> Self::Guard<'a>;

    /// Like [`Monitor::wait`], but returns after `timeout` at the latest.
    fn wait_timeout<'a>(
        &'a self,
        guard: Self::Guard<'a>,
        timeout: Duration,
    ) -> (Self::Guard<'a>, WaitStatus);

    /// Wakes all threads blocked in `wait`/`wait_timeout`.
    fn notify(&self);
}
