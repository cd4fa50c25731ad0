//! # Manager configuration.
//!
//! Provides [`Config`], the settings of one [`RunLoopManager`](crate::RunLoopManager).
//!
//! Config is used in two ways:
//! 1. **Manager creation**: `RunLoopManager::builder(config).build()`
//! 2. **Bounded waits**: `try_start_and_wait` / `try_shutdown_and_wait` read
//!    [`Config::default_wait`]
//!
//! ## Sentinel values
//! - `wait_timeout = 0s` → unbounded (`try_*` waits behave like the plain waits)
//! - `bus_capacity = 0` → clamped to 1

use std::time::Duration;

/// Configuration of a run-loop manager.
///
/// ## Field semantics
/// - `name`: label carried by events and log lines
/// - `bus_capacity`: event bus ring buffer size (min 1)
/// - `wait_timeout`: default bound of the `try_*` waits (`0s` = unbounded)
#[derive(Clone, Debug)]
pub struct Config {
    /// Manager name used in events, logs and errors.
    pub name: String,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Only used when the builder creates its own bus (see
    /// [`ManagerBuilder::with_bus`](crate::ManagerBuilder::with_bus)).
    pub bus_capacity: usize,

    /// Default bound for `try_start_and_wait` / `try_shutdown_and_wait`.
    ///
    /// - `Duration::ZERO` = wait forever
    /// - `> 0` = give up with `HandshakeError::Timeout`
    pub wait_timeout: Duration,
}

impl Config {
    /// Config with the given name and default everything else.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the default wait bound as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(d)` → give up after `d`
    #[inline]
    pub fn default_wait(&self) -> Option<Duration> {
        if self.wait_timeout == Duration::ZERO {
            None
        } else {
            Some(self.wait_timeout)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "runloop"`
    /// - `bus_capacity = 256`
    /// - `wait_timeout = 0s` (unbounded)
    fn default() -> Self {
        Self {
            name: "runloop".to_string(),
            bus_capacity: 256,
            wait_timeout: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_wait_means_unbounded() {
        let cfg = Config::default();
        assert_eq!(cfg.default_wait(), None);

        let cfg = Config {
            wait_timeout: Duration::from_millis(50),
            ..Config::named("io")
        };
        assert_eq!(cfg.default_wait(), Some(Duration::from_millis(50)));
        assert_eq!(cfg.name, "io");
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
