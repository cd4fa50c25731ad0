//! # Start/Stop Handshake Example
//!
//! One worker thread, one controller: start and wait for `Running`, let the loop
//! work for a while, then shut down and wait for `Stopped`. Repeats the cycle to
//! show that a manager can be restarted.
//!
//! ## Run
//! ```bash
//! cargo run --example handshake
//! ```

use std::{
    sync::Arc,
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::Duration,
};

use loopvisor::{Config, LoopGuard, RunLoopManager, RunState};

fn spawn_worker(mgr: Arc<RunLoopManager>, ticks: Arc<AtomicU64>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let guard = match LoopGuard::immediate(&*mgr) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("worker refused: {e}");
                return;
            }
        };
        while guard.should_continue() {
            ticks.fetch_add(1, Ordering::Relaxed);
            thread::sleep(Duration::from_millis(10));
        }
    })
}

fn main() -> anyhow::Result<()> {
    let mgr = Arc::new(RunLoopManager::new(Config::named("ticker")));
    let ticks = Arc::new(AtomicU64::new(0));

    for cycle in 1..=2 {
        mgr.request_start();
        let worker = spawn_worker(Arc::clone(&mgr), Arc::clone(&ticks));

        mgr.request_start_and_wait_timeout(Duration::from_secs(1))?;
        println!("[cycle {cycle}] state={:?}", mgr.run_state());

        thread::sleep(Duration::from_millis(100));

        mgr.request_shutdown_and_wait_timeout(Duration::from_secs(1))?;
        assert_eq!(mgr.run_state(), RunState::Stopped);
        println!(
            "[cycle {cycle}] state={:?} ticks={}",
            mgr.run_state(),
            ticks.load(Ordering::Relaxed)
        );

        worker
            .join()
            .map_err(|_| anyhow::anyhow!("worker panicked"))?;
    }
    Ok(())
}
