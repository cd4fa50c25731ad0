//! # Built-in subscribers
//!
//! - [`StateTracker`]: latest run state per manager, ordered by event `seq`.
//! - [`LogWriter`]: prints events in a human-readable form _(feature `logging`)_.

#[cfg(feature = "logging")]
mod log;
mod state;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use state::StateTracker;
