//! # Events emitted by run-loop managers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Request events**: what controllers asked for (start, shutdown)
//! - **Transition events**: run-state changes reported by the worker side
//! - **Diagnostic events**: rejected guards, timed-out waits, subscriber trouble
//!
//! The [`Event`] struct carries metadata such as timestamps, the manager name, the
//! state observed, reasons and timeouts.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! A manager allocates `seq` and publishes while holding its monitor lock, so for one
//! manager `seq` order is transition order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use loopvisor::{Event, EventKind, RunState};
//!
//! let ev = Event::new(EventKind::WaitTimedOut)
//!     .with_manager("io")
//!     .with_state(RunState::Starting)
//!     .with_timeout(Duration::from_millis(250));
//!
//! assert_eq!(ev.kind, EventKind::WaitTimedOut);
//! assert_eq!(ev.manager.as_deref(), Some("io"));
//! assert_eq!(ev.timeout_ms, Some(250));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::core::RunState;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of run-loop events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Controller requests ===
    /// A controller called `request_start` (or a start-and-wait variant).
    ///
    /// Sets:
    /// - `manager`: manager name
    /// - `state`: state at request time
    StartRequested,

    /// A controller raised the stop flag.
    ///
    /// Only emitted when the flag is actually set (manager not stopped).
    ///
    /// Sets:
    /// - `manager`: manager name
    /// - `state`: state at request time
    ShutdownRequested,

    // === Transitions ===
    /// A loop guard was constructed; the worker is starting.
    ///
    /// Sets:
    /// - `manager`, `state = Starting`
    Starting,

    /// The worker reported it is running.
    ///
    /// Sets:
    /// - `manager`, `state = Running`
    Running,

    /// The loop guard was dropped; the worker stopped and the stop flag was cleared.
    ///
    /// Sets:
    /// - `manager`, `state = Stopped`
    Stopped,

    // === Diagnostics ===
    /// A second loop guard was rejected because one is already active.
    ///
    /// Sets:
    /// - `manager`: manager name
    /// - `state`: state of the active cycle
    GuardRejected,

    /// A bounded controller wait gave up.
    ///
    /// Sets:
    /// - `manager`: manager name
    /// - `state`: state observed when giving up
    /// - `timeout_ms`: configured bound (ms)
    /// - `reason`: waiting operation (`start` / `shutdown`)
    WaitTimedOut,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`, `reason`: subscriber name and cause
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `subscriber`, `reason`: subscriber name and panic info
    SubscriberPanicked,
}

impl EventKind {
    /// The run state this event reports, for transition events.
    pub fn transition(self) -> Option<RunState> {
        match self {
            EventKind::Starting => Some(RunState::Starting),
            EventKind::Running => Some(RunState::Running),
            EventKind::Stopped => Some(RunState::Stopped),
            _ => None,
        }
    }
}

/// Run-loop event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the manager, if applicable.
    pub manager: Option<Arc<str>>,
    /// Run state carried by the event.
    pub state: Option<RunState>,
    /// Human-readable reason.
    pub reason: Option<Arc<str>>,
    /// Wait bound in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Subscriber an overflow/panic report is about.
    pub subscriber: Option<&'static str>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            manager: None,
            state: kind.transition(),
            reason: None,
            timeout_ms: None,
            subscriber: None,
        }
    }

    /// Attaches a manager name.
    #[inline]
    pub fn with_manager(mut self, name: impl Into<Arc<str>>) -> Self {
        self.manager = Some(name.into());
        self
    }

    /// Attaches the run state observed.
    #[inline]
    pub fn with_state(mut self, state: RunState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a timeout duration (stored as milliseconds, saturating).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = u32::try_from(d.as_millis()).unwrap_or(u32::MAX);
        self.timeout_ms = Some(ms);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        let mut ev = Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"));
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"));
        ev.subscriber = Some(subscriber);
        ev
    }

    /// True for the events subscriber workers emit about themselves.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::Starting);
        let b = Event::new(EventKind::Running);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_transition_kinds_carry_state() {
        assert_eq!(Event::new(EventKind::Stopped).state, Some(RunState::Stopped));
        assert_eq!(Event::new(EventKind::StartRequested).state, None);
        assert_eq!(
            Event::new(EventKind::StartRequested)
                .with_state(RunState::Running)
                .state,
            Some(RunState::Running)
        );
    }

    #[test]
    fn test_timeout_saturates() {
        let ev = Event::new(EventKind::WaitTimedOut).with_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(ev.timeout_ms, Some(u32::MAX));
    }

    #[test]
    fn test_subscriber_events() {
        let ev = Event::subscriber_overflow("log", "full");
        assert!(ev.is_subscriber_event());
        assert_eq!(ev.reason.as_deref(), Some("subscriber=log reason=full"));
        assert_eq!(ev.subscriber, Some("log"));
        assert!(!Event::new(EventKind::Running).is_subscriber_event());
    }
}
