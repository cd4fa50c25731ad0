//! Narrow capability sets of a run-loop manager.
//!
//! Each side of the handshake depends only on what it uses:
//!
//! ```text
//! controller ──► StartControl    request_start / request_start_and_wait
//!           └──► ShutdownControl request_shutdown / request_shutdown_and_wait
//! worker     ──► LoopControl     report_running / should_continue
//! LoopGuard  ──► GuardTarget     (sealed) enter Starting / report Stopped
//! ```
//!
//! [`GuardTarget`] is sealed: the Starting and Stopped reports are reachable only
//! through [`LoopGuard`](crate::LoopGuard), which is what makes "stopped is reported
//! exactly once per activation" hold.

/// Controller-side start requests.
pub trait StartControl {
    /// Announces that a fresh cycle may start. Never blocks.
    fn request_start(&self);

    /// Like [`StartControl::request_start`], then blocks until the worker is running.
    fn request_start_and_wait(&self);
}

/// Worker-side loop reporting.
pub trait LoopControl {
    /// Reports that the loop finished its setup and is running.
    fn report_running(&self);

    /// `false` once a shutdown was requested for the current cycle. Never blocks.
    fn should_continue(&self) -> bool;
}

/// Controller-side shutdown requests.
pub trait ShutdownControl {
    /// Raises the stop flag if the loop is not stopped. Never blocks.
    fn request_shutdown(&self);

    /// Like [`ShutdownControl::request_shutdown`], then blocks until the worker stopped.
    fn request_shutdown_and_wait(&self);
}

pub(crate) mod sealed {
    use crate::core::RunState;
    use crate::error::HandshakeError;

    /// Proof that the caller lives in this crate.
    ///
    /// The sealed methods below take one, so code outside the crate can neither
    /// implement nor call them, even through a [`GuardTarget`](super::GuardTarget) bound.
    #[derive(Debug, Clone, Copy)]
    pub struct Token(());

    impl Token {
        pub(crate) fn new() -> Self {
            Token(())
        }
    }

    /// Reports only a loop guard may make.
    pub trait GuardReport {
        /// Claims the guard slot and transitions to `Starting`.
        fn enter_loop(&self, token: Token) -> Result<(), HandshakeError>;

        /// Moves the active cycle to `state` and wakes waiters.
        /// Only forward moves along the cycle are applied.
        fn report_state_change(&self, state: RunState, token: Token);

        /// Clears the stop flag, transitions to `Stopped` and frees the guard slot,
        /// in one critical section.
        fn report_stopped(&self, token: Token);
    }
}

/// Everything a [`LoopGuard`](crate::LoopGuard) needs from its manager.
///
/// Implemented by [`RunLoopManager`](crate::RunLoopManager); cannot be implemented
/// outside this crate, and its guard-only reports cannot be called from outside either:
///
/// ```compile_fail
/// use loopvisor::{GuardTarget, LoopGuard, RunLoopManager};
///
/// fn force_stopped<T: GuardTarget + ?Sized>(target: &T) {
///     target.report_stopped();
/// }
///
/// let mgr = RunLoopManager::default();
/// let _guard = LoopGuard::immediate(&mgr).unwrap();
/// force_stopped(&mgr);
/// ```
pub trait GuardTarget: LoopControl + sealed::GuardReport {}

impl<T: LoopControl + sealed::GuardReport + ?Sized> GuardTarget for T {}
