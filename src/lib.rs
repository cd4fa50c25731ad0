//! # loopvisor
//!
//! **Loopvisor** coordinates the lifecycle of a long-running worker loop with the
//! threads that control it.
//!
//! A controller asks the loop to start or stop and may block until the worker
//! provably reached the matching state. The worker brackets each activation with a
//! scope guard that reports `Stopped` however the loop exits (fall-through, early
//! return, panic).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐   ┌──────────────┐         ┌──────────────────────┐
//!   │ controller A │   │ controller B │         │     worker thread    │
//!   │ start_and_   │   │ shutdown_and_│         │ LoopGuard::new(..)   │
//!   │   wait()     │   │   wait()     │         │ while should_continue│
//!   └──────┬───────┘   └──────┬───────┘         └──────────┬───────────┘
//!          │ StartControl     │ ShutdownControl            │ GuardTarget
//!          ▼                  ▼                            ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  RunLoopManager                                                   │
//! │  - Monitor<LoopState> (mutex + condvar; std or parking_lot)       │
//! │  - LoopState { run, stop_requested, guard_active }                │
//! │  - Bus (publishes under the monitor lock)                         │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                   (capacity: Config::bus_capacity)                │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │ SubscriberSet::listen  │
//!                       └───┬────────────────┬───┘
//!                           ▼                ▼
//!                     StateTracker     user subscribers
//! ```
//!
//! ### Lifecycle
//! ```text
//!            LoopGuard::new            report_running
//! Stopped ─────────────────► Starting ────────────────► Running
//!    ▲                           │                          │
//!    └───────────────────────────┴──────────────────────────┘
//!          LoopGuard dropped (clears stop_requested, wakes waiters)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Handshake**     | Start/stop requests, blocking and bounded waits.             | [`RunLoopManager`], [`StartControl`], [`ShutdownControl`] |
//! | **Worker side**   | Scope-bound activation reporting.                            | [`LoopGuard`], [`StartMode`], [`LoopControl`] |
//! | **Backends**      | Swappable mutex + condition variable.                        | [`Monitor`], [`StdMonitor`]                 |
//! | **Subscriber API**| Hook into lifecycle events.                                  | [`Subscribe`], [`SubscriberSet`], [`StateTracker`] |
//! | **Errors**        | Timed-out waits and rejected guards.                         | [`HandshakeError`]                          |
//! | **Configuration** | Per-manager name, bus capacity and default wait bound.       | [`Config`], [`ManagerBuilder`]              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` subscriber _(demo/reference only)_.
//! - `parking_lot`: exports `ParkingLotMonitor`, a backend on `parking_lot` primitives.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use loopvisor::{LoopGuard, RunLoopManager, RunState};
//!
//! let mgr = Arc::new(RunLoopManager::default());
//!
//! mgr.request_start();
//! let worker = {
//!     let mgr = Arc::clone(&mgr);
//!     thread::spawn(move || {
//!         let guard = LoopGuard::immediate(&*mgr).expect("single worker");
//!         while guard.should_continue() {
//!             thread::yield_now();
//!         }
//!     })
//! };
//!
//! mgr.request_start_and_wait();
//! assert_eq!(mgr.run_state(), RunState::Running);
//!
//! mgr.request_shutdown_and_wait();
//! assert_eq!(mgr.run_state(), RunState::Stopped);
//! assert!(!mgr.is_stop_requested());
//! worker.join().unwrap();
//! ```
mod core;
mod error;
mod events;
mod monitor;
mod subscribers;

// ---- Public re-exports ----

pub use core::{
    Config, GuardTarget, LoopControl, LoopGuard, LoopState, ManagerBuilder, RunLoopManager,
    RunState, ShutdownControl, Snapshot, StartControl, StartMode,
};
pub use error::{HandshakeError, WaitOp};
pub use events::{Bus, Event, EventKind};
pub use monitor::{Monitor, StdMonitor, WaitStatus};
pub use subscribers::{StateTracker, Subscribe, SubscriberSet};

// Optional: a monitor backend on parking_lot primitives.
// Enable with: `--features parking_lot`
#[cfg(feature = "parking_lot")]
pub use monitor::ParkingLotMonitor;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
