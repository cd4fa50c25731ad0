use std::sync::Arc;

use super::{config::Config, manager::RunLoopManager, state::LoopState};
use crate::events::Bus;
use crate::monitor::{Monitor, StdMonitor};

/// Builder for constructing a shared [`RunLoopManager`].
///
/// ```rust
/// use loopvisor::{Bus, Config, RunLoopManager};
///
/// let bus = Bus::new(64);
/// let _rx = bus.subscribe();
///
/// let io = RunLoopManager::builder(Config::named("io")).with_bus(bus.clone()).build();
/// let render = RunLoopManager::builder(Config::named("render")).with_bus(bus).build();
/// assert_eq!(io.bus().receiver_count(), 1);
/// assert_eq!(render.bus().receiver_count(), 1);
/// ```
#[derive(Debug)]
pub struct ManagerBuilder {
    cfg: Config,
    bus: Option<Bus>,
}

impl ManagerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self { cfg, bus: None }
    }

    /// Publishes to an existing bus instead of creating one.
    ///
    /// Lets one [`SubscriberSet`](crate::SubscriberSet) observe several managers.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds a manager on the std backend.
    pub fn build(self) -> Arc<RunLoopManager> {
        self.build_with::<StdMonitor<LoopState>>()
    }

    /// Builds a manager on backend `M`.
    pub fn build_with<M: Monitor<LoopState>>(self) -> Arc<RunLoopManager<M>> {
        let bus = match self.bus {
            Some(bus) => bus,
            None => Bus::new(self.cfg.bus_capacity_clamped()),
        };
        Arc::new(RunLoopManager::with_bus(self.cfg, bus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoopGuard;
    use crate::events::EventKind;

    #[test]
    fn test_shared_bus_carries_both_managers() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let a = ManagerBuilder::new(Config::named("a"))
            .with_bus(bus.clone())
            .build();
        let b = ManagerBuilder::new(Config::named("b")).with_bus(bus).build();

        drop(LoopGuard::delayed(&*a).unwrap());
        drop(LoopGuard::delayed(&*b).unwrap());

        let seen: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|ev| ev.kind == EventKind::Stopped)
            .filter_map(|ev| ev.manager)
            .collect();
        assert_eq!(seen.len(), 2);
        assert_eq!(&*seen[0], "a");
        assert_eq!(&*seen[1], "b");
    }

    #[test]
    fn test_build_uses_config() {
        let mgr = RunLoopManager::builder(Config::named("cfg")).build();
        assert_eq!(mgr.name(), "cfg");
        assert_eq!(mgr.config().bus_capacity, 256);
    }
}
