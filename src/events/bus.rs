//! # Event bus for broadcasting run-loop events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. Publishing is a plain
//! synchronous call, so managers publish from worker and controller threads without an
//! async runtime; only consumers need one (or use `blocking_recv`/`try_recv`).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                    Consumers:
//!   manager "io"     ──┐
//!   manager "render" ──┼──────► Bus ───────► SubscriberSet::listen ────► subscribers
//!   SubscriberSet    ──┘  (broadcast chan)   ad-hoc receivers (tests, tools)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; safe while holding the manager lock.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no active receivers at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for run-loop events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone; clones share one channel, which is how several
///   managers feed one subscriber set.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of receivers currently attached.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_publish_without_receivers_is_noop() {
        let bus = Bus::new(0);
        assert_eq!(bus.receiver_count(), 0);
        bus.publish(Event::new(EventKind::StartRequested));
    }

    #[test]
    fn test_receiver_sees_events_after_subscribe() {
        let bus = Bus::new(4);
        bus.publish(Event::new(EventKind::Starting));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::Running).with_manager("io"));

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::Running);
        assert_eq!(ev.manager.as_deref(), Some("io"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_lagging_receiver_skips_oldest() {
        let bus = Bus::new(2);
        let mut rx = bus.subscribe();
        for _ in 0..3 {
            bus.publish(Event::new(EventKind::ShutdownRequested));
        }
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert!(rx.try_recv().is_ok());
    }
}
