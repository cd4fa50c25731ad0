//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos; production code usually installs a `tracing`
//! subscriber instead.
//!
//! ## Example output
//! ```text
//! [start-requested] manager="io" state=stopped
//! [starting] manager="io"
//! [running] manager="io"
//! [shutdown-requested] manager="io" state=running
//! [stopped] manager="io"
//! [guard-rejected] manager="io" state=running
//! [wait-timed-out] manager="io" op="start" state=starting timeout_ms=250
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn render(e: &Event) -> String {
        let manager = e.manager.as_deref().unwrap_or("unknown");
        let state = e.state.map_or("unknown", |s| s.as_str());
        match e.kind {
            EventKind::StartRequested => {
                format!("[start-requested] manager={manager:?} state={state}")
            }
            EventKind::ShutdownRequested => {
                format!("[shutdown-requested] manager={manager:?} state={state}")
            }
            EventKind::Starting => format!("[starting] manager={manager:?}"),
            EventKind::Running => format!("[running] manager={manager:?}"),
            EventKind::Stopped => format!("[stopped] manager={manager:?}"),
            EventKind::GuardRejected => {
                format!("[guard-rejected] manager={manager:?} state={state}")
            }
            EventKind::WaitTimedOut => format!(
                "[wait-timed-out] manager={manager:?} op={:?} state={state} timeout_ms={}",
                e.reason.as_deref().unwrap_or("unknown"),
                e.timeout_ms.unwrap_or_default(),
            ),
            EventKind::SubscriberOverflow => format!(
                "[subscriber-overflow] {}",
                e.reason.as_deref().unwrap_or("unknown")
            ),
            EventKind::SubscriberPanicked => format!(
                "[subscriber-panicked] {}",
                e.reason.as_deref().unwrap_or("unknown")
            ),
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", Self::render(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RunState;
    use std::time::Duration;

    #[test]
    fn test_render_lines() {
        let ev = Event::new(EventKind::Running).with_manager("io");
        assert_eq!(LogWriter::render(&ev), "[running] manager=\"io\"");

        let ev = Event::new(EventKind::WaitTimedOut)
            .with_manager("io")
            .with_state(RunState::Starting)
            .with_reason("start")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(
            LogWriter::render(&ev),
            "[wait-timed-out] manager=\"io\" op=\"start\" state=starting timeout_ms=250"
        );
    }
}
