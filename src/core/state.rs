//! Run states and the record the monitor protects.

/// Where the worker loop is in its lifecycle.
///
/// Legal transitions form the cycle `Stopped → Starting → Running → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// No loop guard is active.
    #[default]
    Stopped,
    /// A loop guard exists; the worker has not reported it is running yet.
    Starting,
    /// The worker reported it is running.
    Running,
}

impl RunState {
    /// Short stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Starting => "starting",
            RunState::Running => "running",
        }
    }
}

/// Consistent copy of the manager's state, taken under one lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub state: RunState,
    pub stop_requested: bool,
}

/// Data guarded by a manager's monitor.
///
/// Opaque outside the crate; it is public only so that custom [`Monitor`]
/// backends can name it (`impl Monitor<LoopState> for MyMonitor`).
///
/// Invariant: `stop_requested` implies `run != Stopped`.
///
/// [`Monitor`]: crate::Monitor
#[derive(Debug, Default)]
pub struct LoopState {
    pub(crate) run: RunState,
    pub(crate) stop_requested: bool,
    pub(crate) guard_active: bool,
}

impl LoopState {
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.run,
            stop_requested: self.stop_requested,
        }
    }
}
