//! Run-loop events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to the transitions a [`RunLoopManager`](crate::RunLoopManager)
//! goes through and the requests it receives.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `RunLoopManager` (always under its monitor lock, so per-manager
//!   event order equals transition order), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: anything holding a receiver from [`Bus::subscribe`], usually
//!   [`SubscriberSet::listen`](crate::SubscriberSet::listen).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
