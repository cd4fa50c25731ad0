//! # Event subscribers for run-loop managers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! built-in implementations for events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   RunLoopManager ── publish(Event) ──► Bus ──► SubscriberSet::listen
//!                                                      │ emit(&Event)
//!                                         ┌────────────┼────────────┐
//!                                         ▼            ▼            ▼
//!                                    [queue S1]   [queue S2]   [queue SN]
//!                                         │            │            │
//!                                   StateTracker   LogWriter     Custom ...
//! ```
//!
//! Managers are synchronous and publish from plain threads; the subscriber side runs
//! on a tokio runtime.
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use loopvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct RestartCounter;
//!
//! #[async_trait]
//! impl Subscribe for RestartCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::Starting {
//!             // increment a counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "restart-counter"
//!     }
//! }
//! ```

mod embedded;
mod set;
mod subscribe;

pub use embedded::StateTracker;
#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
