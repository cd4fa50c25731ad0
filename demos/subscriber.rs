//! # Custom Subscriber Example
//!
//! Two managers share one event bus. A [`SubscriberSet`] forwards their events to a
//! custom counting subscriber and to the built-in [`StateTracker`].
//!
//! The example counts:
//! - Loop activations (`Starting`)
//! - Shutdown requests
//! - Timed-out waits
//!
//! ## Run
//! ```bash
//! cargo run --example subscriber
//! ```

use std::{
    sync::Arc,
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::Duration,
};

use loopvisor::{
    Bus, Config, Event, EventKind, LoopGuard, RunLoopManager, StateTracker, Subscribe,
    SubscriberSet,
};
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct MetricsSubscriber {
    activations: AtomicU64,
    shutdowns: AtomicU64,
    timeouts: AtomicU64,
}

impl MetricsSubscriber {
    fn print_stats(&self) {
        println!();
        println!("Metrics:");
        println!(" ├─► Activations: {}", self.activations.load(Ordering::Relaxed));
        println!(" ├─► Shutdowns:   {}", self.shutdowns.load(Ordering::Relaxed));
        println!(" └─► Timeouts:    {}", self.timeouts.load(Ordering::Relaxed));
    }
}

#[async_trait::async_trait]
impl Subscribe for MetricsSubscriber {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::Starting => {
                self.activations.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::ShutdownRequested => {
                self.shutdowns.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::WaitTimedOut => {
                self.timeouts.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
    fn name(&self) -> &'static str {
        "metrics"
    }
}

fn spawn_worker(mgr: Arc<RunLoopManager>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let Ok(guard) = LoopGuard::immediate(&*mgr) else {
            return;
        };
        while guard.should_continue() {
            thread::sleep(Duration::from_millis(5));
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let bus = Bus::new(128);
    let io = RunLoopManager::builder(Config::named("io"))
        .with_bus(bus.clone())
        .build();
    let render = RunLoopManager::builder(Config::named("render"))
        .with_bus(bus.clone())
        .build();

    let metrics = Arc::new(MetricsSubscriber::default());
    let tracker = Arc::new(StateTracker::new());
    let set = Arc::new(SubscriberSet::new(
        vec![
            Arc::clone(&metrics) as Arc<dyn Subscribe>,
            Arc::clone(&tracker) as Arc<dyn Subscribe>,
        ],
        bus,
    ));
    let token = CancellationToken::new();
    let listener = set.listen(token.clone());

    // Managers block; drive them from a blocking thread.
    let (io_c, render_c) = (Arc::clone(&io), Arc::clone(&render));
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        // No worker yet: this bounded wait gives up.
        let _ = io_c.request_start_and_wait_timeout(Duration::from_millis(20));

        let workers = [
            spawn_worker(Arc::clone(&io_c)),
            spawn_worker(Arc::clone(&render_c)),
        ];
        io_c.request_start_and_wait();
        render_c.request_start_and_wait();
        thread::sleep(Duration::from_millis(50));

        io_c.request_shutdown_and_wait();
        render_c.request_shutdown_and_wait();
        for w in workers {
            w.join().map_err(|_| anyhow::anyhow!("worker panicked"))?;
        }
        Ok(())
    })
    .await??;

    // Give subscriber queues a moment to drain.
    tokio::time::sleep(Duration::from_millis(50)).await;
    token.cancel();
    listener.await?;

    metrics.print_stats();
    println!("io={:?} render={:?}", tracker.state_of("io"), tracker.state_of("render"));

    if let Ok(set) = Arc::try_unwrap(set) {
        set.shutdown().await;
    }
    Ok(())
}
