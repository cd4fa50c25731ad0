//! # RunLoopManager: start/stop handshake between controllers and one worker loop.
//!
//! The manager owns a [`RunState`] and a one-way stop flag, both guarded by a
//! [`Monitor`]. Controllers ask for start/shutdown and may block until the worker
//! provably reached the matching state; the worker reports through a
//! [`LoopGuard`](crate::LoopGuard) and polls [`RunLoopManager::should_continue`].
//!
//! ## Handshake
//! ```text
//! controller                         manager (monitor)                    worker
//! ──────────                         ─────────────────                    ──────
//! request_start_and_wait() ──wait──► Stopped
//!                                    Starting ◄──────────── LoopGuard::new(Immediate)
//!            ◄──────── notify ────── Running  ◄────────────
//! request_shutdown_and_wait() ─────► stop_requested = true
//!                          ──wait──►                         should_continue() == false
//!            ◄──────── notify ────── Stopped, flag cleared ◄─ guard dropped
//! ```
//!
//! ## Rules
//! - Every read and write of the state happens under the monitor lock.
//! - Every notify happens inside the critical section whose change it announces.
//! - Waiters re-check their predicate after every wakeup.
//! - Only a dropped loop guard reports `Stopped`; that same critical section clears
//!   the stop flag, so `Stopped` is never observed with the flag still raised.
//! - `request_start` never cancels a shutdown pending on a live loop.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::capability::{
    LoopControl, ShutdownControl, StartControl,
    sealed::{GuardReport, Token},
};
use super::config::Config;
use super::state::{LoopState, RunState, Snapshot};
use crate::error::{HandshakeError, WaitOp};
use crate::events::{Bus, Event, EventKind};
use crate::monitor::{Monitor, StdMonitor};

/// Lifecycle state holder for one worker loop.
///
/// Generic over the [`Monitor`] backend; defaults to [`StdMonitor`].
/// Share it between threads with `Arc` (the builder returns one).
pub struct RunLoopManager<M = StdMonitor<LoopState>>
where
    M: Monitor<LoopState>,
{
    cfg: Config,
    name: Arc<str>,
    bus: Bus,
    monitor: M,
}

impl RunLoopManager {
    /// Creates a manager on the std backend with its own event bus.
    pub fn new(cfg: Config) -> Self {
        Self::with_config(cfg)
    }

    /// Starts building a manager on the std backend.
    pub fn builder(cfg: Config) -> super::builder::ManagerBuilder {
        super::builder::ManagerBuilder::new(cfg)
    }
}

impl Default for RunLoopManager {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<M: Monitor<LoopState>> RunLoopManager<M> {
    /// Creates a manager on backend `M` with its own event bus.
    pub fn with_config(cfg: Config) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self::with_bus(cfg, bus)
    }

    pub(crate) fn with_bus(cfg: Config, bus: Bus) -> Self {
        Self {
            name: Arc::from(cfg.name.as_str()),
            cfg,
            bus,
            monitor: M::new(LoopState::default()),
        }
    }

    /// Manager name (from [`Config::name`]).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration this manager was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Bus this manager publishes its events to.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        self.monitor.acquire().run
    }

    /// True while a shutdown request is pending for the current cycle.
    pub fn is_stop_requested(&self) -> bool {
        self.monitor.acquire().stop_requested
    }

    /// Run state and stop flag read under one lock acquisition.
    pub fn snapshot(&self) -> Snapshot {
        self.monitor.acquire().snapshot()
    }

    // ---- controller side ----

    /// Announces that the worker's next loop guard may start a fresh cycle.
    ///
    /// Nothing needs resetting: the stop flag is cleared on every `Stopped` edge, so a
    /// stopped manager already permits a new cycle. A shutdown pending on a live loop is
    /// left in place. Does not wake or spawn the worker; whatever runs the worker
    /// thread does that.
    pub fn request_start(&self) {
        let st = self.monitor.acquire();
        self.publish(Event::new(EventKind::StartRequested).with_state(st.run));
        debug!(manager = %self.name, state = st.run.as_str(), "start requested");
    }

    /// [`request_start`](Self::request_start), then blocks until the worker is running.
    ///
    /// Returns only while the state is `Running`. If the worker runs and stops again
    /// before this caller gets the lock back, it keeps waiting for the next cycle.
    pub fn request_start_and_wait(&self) {
        self.request_start();
        let st = self.monitor.acquire();
        drop(self.wait_for(st, RunState::Running));
    }

    /// Like [`request_start_and_wait`](Self::request_start_and_wait), giving up after `timeout`.
    ///
    /// # Errors
    /// [`HandshakeError::Timeout`] if the worker was not running within `timeout`.
    pub fn request_start_and_wait_timeout(&self, timeout: Duration) -> Result<(), HandshakeError> {
        self.request_start();
        let st = self.monitor.acquire();
        self.wait_within(st, WaitOp::Start, timeout).map(drop)
    }

    /// Start-and-wait bounded by [`Config::wait_timeout`] (unbounded when zero).
    ///
    /// # Errors
    /// [`HandshakeError::Timeout`] if the configured bound elapsed.
    pub fn try_start_and_wait(&self) -> Result<(), HandshakeError> {
        match self.cfg.default_wait() {
            Some(timeout) => self.request_start_and_wait_timeout(timeout),
            None => {
                self.request_start_and_wait();
                Ok(())
            }
        }
    }

    /// Asks the worker to leave its loop. No-op when already stopped; never blocks.
    pub fn request_shutdown(&self) {
        let mut st = self.monitor.acquire();
        self.raise_stop(&mut st);
    }

    /// Raises the stop flag and blocks until the worker reported `Stopped`.
    ///
    /// Returns immediately when already stopped.
    pub fn request_shutdown_and_wait(&self) {
        let mut st = self.monitor.acquire();
        self.raise_stop(&mut st);
        drop(self.wait_for(st, RunState::Stopped));
    }

    /// Like [`request_shutdown_and_wait`](Self::request_shutdown_and_wait), giving up after `timeout`.
    ///
    /// The stop flag stays raised on timeout; the worker still stops at its next poll.
    ///
    /// # Errors
    /// [`HandshakeError::Timeout`] if the worker did not stop within `timeout`.
    pub fn request_shutdown_and_wait_timeout(
        &self,
        timeout: Duration,
    ) -> Result<(), HandshakeError> {
        let mut st = self.monitor.acquire();
        self.raise_stop(&mut st);
        self.wait_within(st, WaitOp::Shutdown, timeout).map(drop)
    }

    /// Shutdown-and-wait bounded by [`Config::wait_timeout`] (unbounded when zero).
    ///
    /// # Errors
    /// [`HandshakeError::Timeout`] if the configured bound elapsed.
    pub fn try_shutdown_and_wait(&self) -> Result<(), HandshakeError> {
        match self.cfg.default_wait() {
            Some(timeout) => self.request_shutdown_and_wait_timeout(timeout),
            None => {
                self.request_shutdown_and_wait();
                Ok(())
            }
        }
    }

    // ---- worker side ----

    /// Reports that the worker finished its setup and is running.
    ///
    /// Only meaningful under a guard built with
    /// [`StartMode::Delayed`](crate::StartMode::Delayed). Ignored (with a warning)
    /// when no loop guard is active, so `Starting` is never skipped.
    pub fn report_running(&self) {
        let mut st = self.monitor.acquire();
        match st.run {
            RunState::Starting => self.transition(&mut st, RunState::Running),
            RunState::Running => {}
            RunState::Stopped => {
                warn!(manager = %self.name, "report_running ignored: no active loop guard");
            }
        }
    }

    /// `false` once a shutdown was requested for the current cycle.
    pub fn should_continue(&self) -> bool {
        !self.monitor.acquire().stop_requested
    }

    // ---- internals ----

    /// Sets the state, wakes every waiter and publishes the transition.
    /// Callers hold the lock that produced `st`.
    fn transition(&self, st: &mut LoopState, to: RunState) {
        let from = st.run;
        st.run = to;
        self.monitor.notify();

        let kind = match to {
            RunState::Stopped => EventKind::Stopped,
            RunState::Starting => EventKind::Starting,
            RunState::Running => EventKind::Running,
        };
        self.publish(Event::new(kind));
        debug!(
            manager = %self.name,
            from = from.as_str(),
            to = to.as_str(),
            "run state changed"
        );
    }

    fn raise_stop(&self, st: &mut LoopState) {
        if st.run == RunState::Stopped || st.stop_requested {
            return;
        }
        st.stop_requested = true;
        self.publish(Event::new(EventKind::ShutdownRequested).with_state(st.run));
        debug!(manager = %self.name, state = st.run.as_str(), "shutdown requested");
    }

    fn wait_for<'a>(&'a self, mut st: M::Guard<'a>, wanted: RunState) -> M::Guard<'a> {
        while st.run != wanted {
            st = self.monitor.wait(st);
        }
        st
    }

    fn wait_within<'a>(
        &'a self,
        mut st: M::Guard<'a>,
        op: WaitOp,
        timeout: Duration,
    ) -> Result<M::Guard<'a>, HandshakeError> {
        let wanted = op.wanted();
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Ok(self.wait_for(st, wanted));
        };

        while st.run != wanted {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(self.timed_out(st, op, timeout));
            }
            let (next, status) = self.monitor.wait_timeout(st, remaining);
            st = next;
            if status.timed_out() && st.run != wanted {
                return Err(self.timed_out(st, op, timeout));
            }
        }
        Ok(st)
    }

    /// Publishes `WaitTimedOut` under the lock and builds the error.
    fn timed_out<'a>(
        &'a self,
        st: M::Guard<'a>,
        op: WaitOp,
        timeout: Duration,
    ) -> HandshakeError {
        let observed = st.run;
        self.publish(
            Event::new(EventKind::WaitTimedOut)
                .with_state(observed)
                .with_timeout(timeout)
                .with_reason(op.as_str()),
        );
        drop(st);
        warn!(
            manager = %self.name,
            op = op.as_str(),
            observed = observed.as_str(),
            ?timeout,
            "bounded wait timed out"
        );
        HandshakeError::Timeout {
            op,
            timeout,
            wanted: op.wanted(),
            observed,
        }
    }

    fn publish(&self, ev: Event) {
        self.bus.publish(ev.with_manager(Arc::clone(&self.name)));
    }
}

impl<M: Monitor<LoopState>> GuardReport for RunLoopManager<M> {
    fn enter_loop(&self, _: Token) -> Result<(), HandshakeError> {
        let mut st = self.monitor.acquire();
        if st.guard_active {
            self.publish(Event::new(EventKind::GuardRejected).with_state(st.run));
            warn!(
                manager = %self.name,
                state = st.run.as_str(),
                "loop guard rejected: another guard is active"
            );
            return Err(HandshakeError::GuardActive {
                manager: self.cfg.name.clone(),
            });
        }
        st.guard_active = true;
        st.stop_requested = false;
        self.transition(&mut st, RunState::Starting);
        Ok(())
    }

    fn report_state_change(&self, state: RunState, token: Token) {
        match state {
            RunState::Running => RunLoopManager::report_running(self),
            RunState::Stopped => self.report_stopped(token),
            RunState::Starting => {
                let st = self.monitor.acquire();
                if st.run != RunState::Starting {
                    warn!(
                        manager = %self.name,
                        state = st.run.as_str(),
                        "state change to starting ignored: only a new loop guard enters it"
                    );
                }
            }
        }
    }

    fn report_stopped(&self, _: Token) {
        let mut st = self.monitor.acquire();
        st.stop_requested = false;
        st.guard_active = false;
        self.transition(&mut st, RunState::Stopped);
    }
}

impl<M: Monitor<LoopState>> StartControl for RunLoopManager<M> {
    fn request_start(&self) {
        RunLoopManager::request_start(self);
    }

    fn request_start_and_wait(&self) {
        RunLoopManager::request_start_and_wait(self);
    }
}

impl<M: Monitor<LoopState>> LoopControl for RunLoopManager<M> {
    fn report_running(&self) {
        RunLoopManager::report_running(self);
    }

    fn should_continue(&self) -> bool {
        RunLoopManager::should_continue(self)
    }
}

impl<M: Monitor<LoopState>> ShutdownControl for RunLoopManager<M> {
    fn request_shutdown(&self) {
        RunLoopManager::request_shutdown(self);
    }

    fn request_shutdown_and_wait(&self) {
        RunLoopManager::request_shutdown_and_wait(self);
    }
}

impl<M: Monitor<LoopState>> fmt::Debug for RunLoopManager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.snapshot();
        f.debug_struct("RunLoopManager")
            .field("name", &self.name)
            .field("state", &snap.state)
            .field("stop_requested", &snap.stop_requested)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoopGuard, StartMode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    fn manager<M: Monitor<LoopState>>(name: &str) -> Arc<RunLoopManager<M>> {
        Arc::new(RunLoopManager::<M>::with_config(Config::named(name)))
    }

    /// Worker that loops until asked to stop, signalling once its guard exists.
    fn spawn_worker<M>(
        mgr: &Arc<RunLoopManager<M>>,
        mode: StartMode,
    ) -> (thread::JoinHandle<()>, mpsc::Receiver<()>)
    where
        M: Monitor<LoopState> + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let mgr = Arc::clone(mgr);
        let handle = thread::spawn(move || {
            let guard = LoopGuard::new(&*mgr, mode).expect("single worker");
            let _ = tx.send(());
            if mode == StartMode::Delayed {
                thread::sleep(Duration::from_millis(10));
                guard.report_running();
            }
            while guard.should_continue() {
                thread::sleep(Duration::from_millis(1));
            }
        });
        (handle, rx)
    }

    // Scenario A: start-wait issued before any worker exists.
    fn start_wait_before_worker<M: Monitor<LoopState> + 'static>() {
        let mgr = manager::<M>("scenario-a");

        let controller = {
            let mgr = Arc::clone(&mgr);
            thread::spawn(move || {
                mgr.request_start_and_wait();
                mgr.run_state()
            })
        };
        thread::sleep(Duration::from_millis(20));
        assert_eq!(mgr.run_state(), RunState::Stopped);

        let (worker, _ready) = spawn_worker(&mgr, StartMode::Immediate);
        assert_eq!(controller.join().unwrap(), RunState::Running);

        // Scenario B: shutdown-wait after A.
        mgr.request_shutdown_and_wait();
        assert_eq!(
            mgr.snapshot(),
            Snapshot {
                state: RunState::Stopped,
                stop_requested: false,
            }
        );
        worker.join().unwrap();
    }

    // Scenario C: shutdown and start waiters hammer the manager while a fourth thread
    // cycles the worker; the transitions on the bus must stay a clean
    // Starting → Running → Stopped cycle.
    fn concurrent_shutdown_waiters<M: Monitor<LoopState> + 'static>() {
        const MIN_CYCLES: usize = 25;
        const MAX_CYCLES: usize = 2_000;
        const START_WAITERS: usize = 3;

        let mgr = Arc::new(RunLoopManager::<M>::with_config(Config {
            bus_capacity: 1 << 14,
            ..Config::named("scenario-c")
        }));
        let mut rx = mgr.bus().subscribe();
        let starts_done = Arc::new(AtomicUsize::new(0));

        let cycler = {
            let mgr = Arc::clone(&mgr);
            let starts_done = Arc::clone(&starts_done);
            thread::spawn(move || {
                let mut cycles = 0;
                while cycles < MIN_CYCLES || starts_done.load(Ordering::SeqCst) < START_WAITERS
                {
                    assert!(cycles < MAX_CYCLES, "start waiters never saw Running");
                    let (worker, ready) = spawn_worker(&mgr, StartMode::Immediate);
                    ready.recv().unwrap();
                    thread::sleep(Duration::from_millis(1));
                    mgr.request_shutdown_and_wait();
                    worker.join().unwrap();
                    cycles += 1;
                }
                cycles
            })
        };

        let shutdown_waiters: Vec<_> = (0..3)
            .map(|_| {
                let mgr = Arc::clone(&mgr);
                thread::spawn(move || {
                    for _ in 0..10 {
                        mgr.request_shutdown_and_wait_timeout(Duration::from_secs(30))?;
                    }
                    Ok::<_, HandshakeError>(())
                })
            })
            .collect();

        let start_waiters: Vec<_> = (0..START_WAITERS)
            .map(|_| {
                let mgr = Arc::clone(&mgr);
                let starts_done = Arc::clone(&starts_done);
                thread::spawn(move || {
                    for _ in 0..5 {
                        mgr.request_start_and_wait();
                    }
                    starts_done.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        for w in start_waiters {
            w.join().unwrap();
        }
        let cycles = cycler.join().unwrap();
        for w in shutdown_waiters {
            w.join().unwrap().unwrap();
        }
        assert_eq!(mgr.run_state(), RunState::Stopped);
        assert!(!mgr.is_stop_requested());

        let transitions: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|ev| ev.kind.transition())
            .collect();
        assert_eq!(transitions.len(), cycles * 3);
        for cycle in transitions.chunks(3) {
            assert_eq!(
                cycle,
                [RunState::Starting, RunState::Running, RunState::Stopped]
            );
        }
    }

    // Several controllers block on start at the same time; all must see Running.
    fn concurrent_start_waiters<M: Monitor<LoopState> + 'static>() {
        let mgr = manager::<M>("start-waiters");

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let mgr = Arc::clone(&mgr);
                thread::spawn(move || {
                    mgr.request_start_and_wait();
                })
            })
            .collect();
        thread::sleep(Duration::from_millis(20));

        let (worker, _ready) = spawn_worker(&mgr, StartMode::Delayed);
        for w in waiters {
            w.join().unwrap();
        }
        assert_eq!(mgr.run_state(), RunState::Running);

        mgr.request_shutdown_and_wait();
        worker.join().unwrap();
    }

    fn run_suite<M: Monitor<LoopState> + 'static>() {
        start_wait_before_worker::<M>();
        concurrent_shutdown_waiters::<M>();
        concurrent_start_waiters::<M>();
    }

    #[test]
    fn test_scenarios_std_backend() {
        run_suite::<StdMonitor<LoopState>>();
    }

    #[cfg(feature = "parking_lot")]
    #[test]
    fn test_scenarios_parking_lot_backend() {
        run_suite::<crate::monitor::ParkingLotMonitor<LoopState>>();
    }

    #[test]
    fn test_fresh_manager_is_stopped() {
        let mgr = RunLoopManager::default();
        assert_eq!(mgr.run_state(), RunState::Stopped);
        assert!(mgr.should_continue());
        assert_eq!(mgr.name(), "runloop");
    }

    #[test]
    fn test_shutdown_wait_when_stopped_returns_immediately() {
        let mgr = RunLoopManager::new(Config::named("idle"));
        mgr.request_shutdown_and_wait();
        mgr.request_shutdown();
        // Shutdown on a stopped manager leaves nothing pending for the next cycle.
        assert!(!mgr.is_stop_requested());
        assert!(mgr.should_continue());
    }

    #[test]
    fn test_should_continue_flips_after_shutdown_and_resets_on_new_cycle() {
        let mgr = RunLoopManager::new(Config::named("flag"));
        {
            let guard = LoopGuard::immediate(&mgr).unwrap();
            assert!(guard.should_continue());
            mgr.request_shutdown();
            assert!(!mgr.should_continue());
            // A start request must not cancel the pending shutdown of a live loop.
            mgr.request_start();
            assert!(!mgr.should_continue());
        }
        assert!(mgr.should_continue());

        let _guard = LoopGuard::immediate(&mgr).unwrap();
        assert!(mgr.should_continue());
    }

    #[test]
    fn test_report_running_without_guard_is_ignored() {
        let mgr = RunLoopManager::default();
        mgr.report_running();
        assert_eq!(mgr.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_start_timeout_reports_observed_state() {
        let mgr = RunLoopManager::new(Config::named("slow"));
        let err = mgr
            .request_start_and_wait_timeout(Duration::from_millis(20))
            .unwrap_err();
        assert_eq!(
            err,
            HandshakeError::Timeout {
                op: WaitOp::Start,
                timeout: Duration::from_millis(20),
                wanted: RunState::Running,
                observed: RunState::Stopped,
            }
        );

        let _guard = LoopGuard::delayed(&mgr).unwrap();
        let err = mgr
            .request_start_and_wait_timeout(Duration::from_millis(20))
            .unwrap_err();
        assert_eq!(err.as_label(), "start_timeout");
        assert!(matches!(
            err,
            HandshakeError::Timeout {
                observed: RunState::Starting,
                ..
            }
        ));
    }

    #[test]
    fn test_shutdown_timeout_keeps_flag_raised() {
        let mgr = RunLoopManager::new(Config::named("stuck"));
        let guard = LoopGuard::immediate(&mgr).unwrap();

        let err = mgr
            .request_shutdown_and_wait_timeout(Duration::from_millis(20))
            .unwrap_err();
        assert_eq!(err.as_label(), "shutdown_timeout");
        assert!(!guard.should_continue());

        drop(guard);
        assert!(
            mgr.request_shutdown_and_wait_timeout(Duration::ZERO)
                .is_ok()
        );
    }

    #[test]
    fn test_unrelated_wakeup_does_not_end_bounded_wait() {
        let mgr = RunLoopManager::new(Config::named("woken"));
        let _guard = LoopGuard::delayed(&mgr).unwrap();

        let err = thread::scope(|s| {
            s.spawn(|| {
                thread::sleep(Duration::from_millis(10));
                // Starting → Running notifies the shutdown waiter without satisfying it.
                mgr.report_running();
            });
            mgr.request_shutdown_and_wait_timeout(Duration::from_millis(100))
        })
        .unwrap_err();

        assert!(matches!(
            err,
            HandshakeError::Timeout {
                op: WaitOp::Shutdown,
                observed: RunState::Running,
                ..
            }
        ));
    }

    #[test]
    fn test_start_request_only_announces() {
        let mgr = RunLoopManager::new(Config::named("announce"));
        let mut rx = mgr.bus().subscribe();

        mgr.request_start();
        assert_eq!(
            mgr.snapshot(),
            Snapshot {
                state: RunState::Stopped,
                stop_requested: false,
            }
        );
        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::StartRequested);
        assert_eq!(ev.state, Some(RunState::Stopped));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_try_waits_use_configured_bound() {
        let mgr = RunLoopManager::new(Config {
            wait_timeout: Duration::from_millis(10),
            ..Config::named("bounded")
        });
        assert!(mgr.try_start_and_wait().unwrap_err().is_timeout());
        assert!(mgr.try_shutdown_and_wait().is_ok());

        let _guard = LoopGuard::immediate(&mgr).unwrap();
        assert!(mgr.try_start_and_wait().is_ok());
        assert!(mgr.try_shutdown_and_wait().unwrap_err().is_timeout());
    }

    #[test]
    fn test_huge_timeout_behaves_like_unbounded_wait() {
        let mgr = RunLoopManager::default();
        let _guard = LoopGuard::immediate(&mgr).unwrap();
        assert!(mgr.request_start_and_wait_timeout(Duration::MAX).is_ok());
    }

    #[test]
    fn test_events_follow_transition_order() {
        let mgr = RunLoopManager::new(Config::named("events"));
        let mut rx = mgr.bus().subscribe();

        {
            let _guard = LoopGuard::immediate(&mgr).unwrap();
            mgr.request_shutdown();
        }

        let mut kinds = Vec::new();
        let mut last_seq = None;
        while let Ok(ev) = rx.try_recv() {
            assert_eq!(ev.manager.as_deref(), Some("events"));
            if let Some(prev) = last_seq {
                assert!(ev.seq > prev);
            }
            last_seq = Some(ev.seq);
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::Starting,
                EventKind::Running,
                EventKind::ShutdownRequested,
                EventKind::Stopped,
            ]
        );
    }

    #[test]
    fn test_debug_shows_state() {
        let mgr = RunLoopManager::new(Config::named("dbg"));
        let text = format!("{mgr:?}");
        assert!(text.contains("\"dbg\""));
        assert!(text.contains("Stopped"));
    }
}
