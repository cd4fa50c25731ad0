//! Error types used by the bounded and guarded parts of the handshake.
//!
//! The unbounded operations (`request_start_and_wait`, `request_shutdown_and_wait`, ...)
//! never fail. [`HandshakeError`] is only produced by:
//!
//! - bounded waits (`*_timeout`, `try_*`) that ran out of time;
//! - a second [`LoopGuard`](crate::LoopGuard) built while another one is active.
//!
//! Like the rest of the crate it provides helper methods (`as_label`, `as_message`)
//! for logging/metrics.

use std::time::Duration;
use thiserror::Error;

use crate::core::RunState;

/// Controller operation that was waiting when a bounded wait elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOp {
    /// Waiting for the worker to report [`RunState::Running`].
    Start,
    /// Waiting for the worker to report [`RunState::Stopped`].
    Shutdown,
}

impl WaitOp {
    /// Short stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitOp::Start => "start",
            WaitOp::Shutdown => "shutdown",
        }
    }

    /// State the operation waits for.
    pub fn wanted(&self) -> RunState {
        match self {
            WaitOp::Start => RunState::Running,
            WaitOp::Shutdown => RunState::Stopped,
        }
    }
}

/// # Errors produced by the run-loop handshake.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandshakeError {
    /// A bounded wait elapsed before the manager reached the wanted state.
    #[error("{} wait timed out after {timeout:?}: wanted {wanted:?}, observed {observed:?}", .op.as_str())]
    Timeout {
        /// Operation that was waiting.
        op: WaitOp,
        /// The bound that was exceeded.
        timeout: Duration,
        /// State the caller was waiting for.
        wanted: RunState,
        /// State observed when the wait gave up.
        observed: RunState,
    },

    /// A loop guard is already active on this manager; the manager drives one worker at a time.
    #[error("manager {manager:?} already has an active loop guard")]
    GuardActive {
        /// Name of the manager that rejected the guard.
        manager: String,
    },
}

impl HandshakeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use loopvisor::HandshakeError;
    ///
    /// let err = HandshakeError::GuardActive { manager: "io".into() };
    /// assert_eq!(err.as_label(), "guard_active");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandshakeError::Timeout { op: WaitOp::Start, .. } => "start_timeout",
            HandshakeError::Timeout { op: WaitOp::Shutdown, .. } => "shutdown_timeout",
            HandshakeError::GuardActive { .. } => "guard_active",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandshakeError::Timeout {
                op,
                timeout,
                observed,
                ..
            } => format!("{} timeout: {timeout:?} (state={observed:?})", op.as_str()),
            HandshakeError::GuardActive { manager } => {
                format!("guard rejected: manager={manager}")
            }
        }
    }

    /// True if the error is a timed-out bounded wait.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HandshakeError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_labels_follow_operation() {
        let start = HandshakeError::Timeout {
            op: WaitOp::Start,
            timeout: Duration::from_millis(5),
            wanted: RunState::Running,
            observed: RunState::Stopped,
        };
        let shutdown = HandshakeError::Timeout {
            op: WaitOp::Shutdown,
            timeout: Duration::from_millis(5),
            wanted: RunState::Stopped,
            observed: RunState::Running,
        };
        assert_eq!(start.as_label(), "start_timeout");
        assert_eq!(shutdown.as_label(), "shutdown_timeout");
        assert!(start.is_timeout());
        assert!(shutdown.as_message().contains("Running"));
    }

    #[test]
    fn test_display_mentions_states() {
        let err = HandshakeError::Timeout {
            op: WaitOp::Start,
            timeout: Duration::from_secs(1),
            wanted: RunState::Running,
            observed: RunState::Starting,
        };
        let text = err.to_string();
        assert!(text.starts_with("start wait timed out"));
        assert!(text.contains("wanted Running"));
        assert!(text.contains("observed Starting"));
    }

    #[test]
    fn test_guard_active_is_not_timeout() {
        let err = HandshakeError::GuardActive {
            manager: "render".into(),
        };
        assert!(!err.is_timeout());
        assert_eq!(err.as_message(), "guard rejected: manager=render");
    }
}
