//! # Delayed Start Example
//!
//! The worker needs setup before it can serve. It enters with
//! [`StartMode::Delayed`], so controllers waiting on start only return once setup
//! finished and the worker called `report_running`.
//!
//! Also shows that a failing setup still reports `Stopped`: the guard drops on the
//! early return and a waiting shutdown completes.
//!
//! ## Run
//! ```bash
//! cargo run --example delayed_start
//! ```

use std::{sync::Arc, thread, time::Duration};

use loopvisor::{Config, HandshakeError, LoopGuard, RunLoopManager, RunState, StartMode};

fn worker(mgr: &RunLoopManager, fail_setup: bool) -> Result<(), String> {
    let guard = LoopGuard::new(mgr, StartMode::Delayed).map_err(|e| e.to_string())?;

    // Pretend to open files, sockets, ...
    thread::sleep(Duration::from_millis(200));
    if fail_setup {
        return Err("setup failed".into());
    }
    guard.report_running();

    while guard.should_continue() {
        thread::sleep(Duration::from_millis(5));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mgr = Arc::new(RunLoopManager::new(Config {
        wait_timeout: Duration::from_millis(50),
        ..Config::named("slow-setup")
    }));

    // Successful setup.
    mgr.request_start();
    let handle = {
        let mgr = Arc::clone(&mgr);
        thread::spawn(move || worker(&mgr, false))
    };

    // Short bound: setup is still running, so this times out in `Starting`.
    match mgr.try_start_and_wait() {
        Err(HandshakeError::Timeout { observed, .. }) => {
            println!("not yet running, observed={observed:?}")
        }
        other => println!("unexpected: {other:?}"),
    }

    mgr.request_start_and_wait();
    println!("running: {:?}", mgr.run_state());
    mgr.request_shutdown_and_wait();
    let res = handle
        .join()
        .map_err(|_| anyhow::anyhow!("worker panicked"))?;
    println!("worker finished: {res:?}");

    // Failing setup: the guard still reports Stopped.
    mgr.request_start();
    let handle = {
        let mgr = Arc::clone(&mgr);
        thread::spawn(move || worker(&mgr, true))
    };
    let res = handle
        .join()
        .map_err(|_| anyhow::anyhow!("worker panicked"))?;
    mgr.request_shutdown_and_wait();
    assert_eq!(mgr.run_state(), RunState::Stopped);
    println!("worker finished: {res:?}, state={:?}", mgr.run_state());
    Ok(())
}
