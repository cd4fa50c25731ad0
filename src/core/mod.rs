//! Handshake core: state machine, loop guard and their configuration.
//!
//! The public API from this module is [`RunLoopManager`], [`LoopGuard`] and the
//! capability traits they are wired through.
//!
//! Internal modules:
//! - `state`: run states and the record the monitor protects;
//! - `capability`: narrow controller/worker/guard capability traits;
//! - `manager`: the state holder and its controller/worker operations;
//! - `guard`: scope-bound loop bracket that reports `Stopped` on drop;
//! - `config`: per-manager settings;
//! - `builder`: assembles managers, optionally sharing one event bus.

mod builder;
mod capability;
mod config;
mod guard;
mod manager;
mod state;

pub use builder::ManagerBuilder;
pub use capability::{GuardTarget, LoopControl, ShutdownControl, StartControl};
pub use config::Config;
pub use guard::{LoopGuard, StartMode};
pub use manager::RunLoopManager;
pub use state::{LoopState, RunState, Snapshot};
