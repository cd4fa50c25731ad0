//! # StateTracker: latest run state per manager.
//!
//! Follows `Starting` / `Running` / `Stopped` events and keeps, per manager name,
//! the most recent state seen. Useful for status pages and for checking at shutdown
//! which loops are still up.
//!
//! ## Rules
//! - Only transition events change the tracked state.
//! - Events with `seq <= last_seq` for the same manager are **rejected** (stale).
//! - Reads are **eventually consistent** with the managers (delivery is async).
//!
//! ```text
//! on_event(Running,  seq=41) → "io" = Running,  last_seq=41
//! on_event(Stopped,  seq=57) → "io" = Stopped,  last_seq=57
//! on_event(Starting, seq=50) → rejected (stale)
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::core::RunState;
use crate::events::Event;
use crate::subscribers::Subscribe;

#[derive(Debug, Clone, Copy)]
struct Tracked {
    last_seq: u64,
    state: RunState,
}

/// Tracks the latest [`RunState`] of every manager seen on the bus.
#[derive(Debug)]
pub struct StateTracker {
    inner: RwLock<HashMap<String, Tracked>>,
    capacity: usize,
}

impl StateTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            capacity: 2048,
        }
    }

    /// Configure the queue capacity for this subscriber.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Applies an event; returns `true` if it changed the tracked state.
    pub fn update(&self, ev: &Event) -> bool {
        let (Some(name), Some(state)) = (ev.manager.as_deref(), ev.kind.transition()) else {
            return false;
        };

        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match map.get_mut(name) {
            Some(t) if ev.seq <= t.last_seq => false,
            Some(t) => {
                t.last_seq = ev.seq;
                t.state = state;
                true
            }
            None => {
                map.insert(
                    name.to_string(),
                    Tracked {
                        last_seq: ev.seq,
                        state,
                    },
                );
                true
            }
        }
    }

    /// Latest state seen for `manager`, if any.
    #[must_use]
    pub fn state_of(&self, manager: &str) -> Option<RunState> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(manager)
            .map(|t| t.state)
    }

    /// Sorted names of managers whose last state is not `Stopped`.
    #[must_use]
    pub fn active(&self) -> Vec<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut v: Vec<String> = map
            .iter()
            .filter(|(_, t)| t.state != RunState::Stopped)
            .map(|(name, _)| name.clone())
            .collect();
        v.sort_unstable();
        v
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for StateTracker {
    async fn on_event(&self, ev: &Event) {
        self.update(ev);
    }

    fn name(&self) -> &'static str {
        "StateTracker"
    }

    fn queue_capacity(&self) -> usize {
        self.capacity
    }
}
