//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`] to multiple subscribers
//! **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and reported as `SubscriberPanicked`.
//! - Reports about subscribers never feed back: a subscriber does not receive reports
//!   about itself, and trouble while handling a report is logged, not republished.
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//! - No retries on per-subscriber queue overflow (events are dropped for that
//!   subscriber and a `SubscriberOverflow` event is published).
//!
//! ## Diagram
//! ```text
//!   Bus ──► listen() ──► emit(&Event)
//!                           │               (Arc-clone per subscriber)
//!                           ├──────────► [queue S1] ─► worker S1 ─► on_event()
//!                           ├──────────► [queue S2] ─► worker S2 ─► on_event()
//!                           └──────────► [queue SN] ─► worker SN ─► on_event()
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::events::{Bus, Event};

use super::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event subscribers.
///
/// Must be created inside a tokio runtime: workers are spawned with `tokio::spawn`.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// `bus` is both where [`listen`](Self::listen) reads from and where overflow and
    /// panic reports are published.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await
                    {
                        let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        };
                        warn!(subscriber = sub.name(), %info, "subscriber panicked");
                        if !ev.is_subscriber_event() {
                            bus_for_worker.publish(Event::subscriber_panicked(sub.name(), info));
                        }
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all subscribers (non-blocking).
    ///
    /// A subscriber whose queue is full or closed misses the event; a
    /// `SubscriberOverflow` is published unless the event is itself a subscriber report.
    /// Reports are not delivered to the subscriber they are about.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        let is_report = ev.is_subscriber_event();

        for channel in &self.channels {
            if is_report && ev.subscriber == Some(channel.name) {
                continue;
            }
            let reason = match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            warn!(subscriber = channel.name, reason, seq = ev.seq, "subscriber dropped event");
            if !is_report {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Spawns a task forwarding every bus event to [`emit`](Self::emit).
    ///
    /// Runs until `token` is cancelled or every bus sender is gone. A lagging
    /// listener skips the events it missed and keeps going.
    pub fn listen(self: &Arc<Self>, token: CancellationToken) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    res = rx.recv() => match res {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "event listener lagged");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        })
    }

    /// Graceful shutdown: close all queues and await worker completion.
    ///
    /// Call after the listener stopped, or the set is still shared with it.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.channels.iter().map(|c| c.name).collect();
        f.debug_struct("SubscriberSet")
            .field("subscribers", &names)
            .finish_non_exhaustive()
    }
}
