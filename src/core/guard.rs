//! # LoopGuard: scope-bound bracket around one loop activation.
//!
//! Construction reports `Starting` (and `Running` in [`StartMode::Immediate`]);
//! dropping the guard reports `Stopped`. Drop runs on every way out of the scope:
//!
//! ```text
//! fn worker(mgr: &RunLoopManager) -> Result<(), E> {
//!     let guard = LoopGuard::immediate(mgr)?;   // Starting → Running
//!     while guard.should_continue() {
//!         step()?;                              // early return  ─┐
//!         maybe_panic();                        // unwinding     ─┤─► Drop → Stopped
//!     }                                         // fall-through  ─┘
//!     Ok(())
//! }
//! ```
//!
//! The error or panic keeps propagating after the drop; the guard never swallows it.
//! The guard is neither `Clone` nor `Copy`; moving it hands the report over, and the
//! moved-from binding is never dropped, so `Stopped` is reported exactly once.

use std::fmt;

use super::capability::{GuardTarget, sealed::Token};
use super::state::RunState;
use crate::error::HandshakeError;

/// When a new loop guard reports `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Report `Starting`, then `Running` right away.
    #[default]
    Immediate,
    /// Report `Starting` only; the worker calls `report_running` once it is ready
    /// (e.g. after expensive setup).
    Delayed,
}

/// Brackets one activation of a worker loop. See the [module docs](self).
#[must_use = "dropping a LoopGuard immediately reports the loop as stopped"]
pub struct LoopGuard<'a, T: GuardTarget + ?Sized> {
    target: &'a T,
}

impl<'a, T: GuardTarget + ?Sized> LoopGuard<'a, T> {
    /// Enters a loop activation on `target`.
    ///
    /// # Errors
    /// [`HandshakeError::GuardActive`] if another guard is active on the same manager.
    /// The active cycle is left untouched.
    pub fn new(target: &'a T, mode: StartMode) -> Result<Self, HandshakeError> {
        target.enter_loop(Token::new())?;
        let guard = Self { target };
        if mode == StartMode::Immediate {
            guard.report_running();
        }
        Ok(guard)
    }

    /// Shorthand for [`LoopGuard::new`] with [`StartMode::Immediate`].
    ///
    /// # Errors
    /// See [`LoopGuard::new`].
    pub fn immediate(target: &'a T) -> Result<Self, HandshakeError> {
        Self::new(target, StartMode::Immediate)
    }

    /// Shorthand for [`LoopGuard::new`] with [`StartMode::Delayed`].
    ///
    /// # Errors
    /// See [`LoopGuard::new`].
    pub fn delayed(target: &'a T) -> Result<Self, HandshakeError> {
        Self::new(target, StartMode::Delayed)
    }

    /// Reports `Running`; needed once under [`StartMode::Delayed`].
    pub fn report_running(&self) {
        self.target
            .report_state_change(RunState::Running, Token::new());
    }

    /// `false` once a shutdown was requested for this activation.
    pub fn should_continue(&self) -> bool {
        self.target.should_continue()
    }

    /// Manager this guard reports to.
    pub fn target(&self) -> &'a T {
        self.target
    }
}

impl<T: GuardTarget + ?Sized> Drop for LoopGuard<'_, T> {
    fn drop(&mut self) {
        self.target.report_stopped(Token::new());
    }
}

impl<T: GuardTarget + ?Sized> fmt::Debug for LoopGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::sealed::GuardReport;
    use crate::core::{Config, RunLoopManager, RunState, Snapshot};
    use crate::events::EventKind;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    const STOPPED_CLEAN: Snapshot = Snapshot {
        state: RunState::Stopped,
        stop_requested: false,
    };

    #[test]
    fn test_immediate_reports_running() {
        let mgr = RunLoopManager::default();
        let guard = LoopGuard::immediate(&mgr).unwrap();
        assert_eq!(mgr.run_state(), RunState::Running);
        drop(guard);
        assert_eq!(mgr.snapshot(), STOPPED_CLEAN);
    }

    #[test]
    fn test_delayed_waits_for_report() {
        let mgr = RunLoopManager::default();
        let guard = LoopGuard::delayed(&mgr).unwrap();
        assert_eq!(mgr.run_state(), RunState::Starting);
        guard.report_running();
        assert_eq!(mgr.run_state(), RunState::Running);
    }

    #[test]
    fn test_state_changes_only_move_forward() {
        let mgr = RunLoopManager::default();
        let guard = LoopGuard::delayed(&mgr).unwrap();
        mgr.report_state_change(RunState::Starting, Token::new());
        assert_eq!(mgr.run_state(), RunState::Starting);
        guard.report_running();
        mgr.report_state_change(RunState::Starting, Token::new());
        assert_eq!(mgr.run_state(), RunState::Running);
    }

    #[test]
    fn test_early_error_return_reports_stopped() {
        fn body(mgr: &RunLoopManager) -> Result<u32, &'static str> {
            let guard = LoopGuard::immediate(mgr).map_err(|_| "guard")?;
            mgr.request_shutdown();
            if !guard.should_continue() {
                return Err("asked to stop");
            }
            Ok(1)
        }

        let mgr = RunLoopManager::default();
        assert_eq!(body(&mgr), Err("asked to stop"));
        assert_eq!(mgr.snapshot(), STOPPED_CLEAN);
    }

    #[test]
    fn test_panic_in_loop_body_reports_stopped_and_propagates() {
        let mgr = Arc::new(RunLoopManager::default());
        let worker = {
            let mgr = Arc::clone(&mgr);
            thread::spawn(move || {
                let _guard = LoopGuard::immediate(&*mgr).unwrap();
                mgr.request_shutdown();
                panic!("loop body failed");
            })
        };
        // The panic still reaches the joiner...
        assert!(worker.join().is_err());
        // ...after the guard cleaned up.
        assert_eq!(mgr.snapshot(), STOPPED_CLEAN);
        mgr.request_shutdown_and_wait();
    }

    #[test]
    fn test_catch_unwind_sees_cleanup_first() {
        let mgr = RunLoopManager::default();
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = LoopGuard::delayed(&mgr).unwrap();
            panic!("setup failed");
        }));
        assert!(res.is_err());
        assert_eq!(mgr.snapshot(), STOPPED_CLEAN);
    }

    #[test]
    fn test_second_guard_is_rejected() {
        let mgr = RunLoopManager::new(Config::named("exclusive"));
        let mut rx = mgr.bus().subscribe();

        let first = LoopGuard::immediate(&mgr).unwrap();
        let err = LoopGuard::immediate(&mgr).unwrap_err();
        assert_eq!(
            err,
            HandshakeError::GuardActive {
                manager: "exclusive".into()
            }
        );
        // The rejected guard must not have reported anything for the live cycle.
        assert_eq!(mgr.run_state(), RunState::Running);

        drop(first);
        assert_eq!(mgr.run_state(), RunState::Stopped);
        let again = LoopGuard::immediate(&mgr);
        assert!(again.is_ok());

        let kinds: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|ev| ev.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Starting,
                EventKind::Running,
                EventKind::GuardRejected,
                EventKind::Stopped,
                EventKind::Starting,
                EventKind::Running,
            ]
        );
    }

    #[test]
    fn test_moved_guard_reports_once() {
        let mgr = RunLoopManager::new(Config::named("moved"));
        let mut rx = mgr.bus().subscribe();

        let guard = LoopGuard::immediate(&mgr).unwrap();
        let holder = vec![guard];
        assert_eq!(mgr.run_state(), RunState::Running);
        drop(holder);

        let stopped = std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|ev| ev.kind == EventKind::Stopped)
            .count();
        assert_eq!(stopped, 1);
    }

    #[test]
    fn test_guard_over_dyn_target() {
        let mgr = RunLoopManager::default();
        let target: &dyn GuardTarget = &mgr;
        let guard = LoopGuard::immediate(target).unwrap();
        assert!(guard.should_continue());
        assert_eq!(format!("{guard:?}"), "LoopGuard { .. }");
    }
}
