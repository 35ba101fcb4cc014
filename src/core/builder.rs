use std::sync::Arc;

use crate::{
    collaborators::Collaborators,
    config::ConfigGate,
    core::{
        CoordinatorConfig,
        coordinator::{Coordinator, CoordinatorParts},
    },
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Coordinator`].
pub struct CoordinatorBuilder {
    cfg: CoordinatorConfig,
    collaborators: Collaborators,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl CoordinatorBuilder {
    /// Creates a new builder with the given collaborators and configuration.
    pub fn new(collaborators: Collaborators, cfg: CoordinatorConfig) -> Self {
        Self {
            cfg,
            collaborators,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive every decision event through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the coordinator and runs its process-start deprecation check.
    ///
    /// Must be called within a tokio runtime: subscriber workers, the bus listener
    /// and any deprecation warning are spawned here.
    pub fn build(self) -> Arc<Coordinator> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let config = ConfigGate::new(Arc::clone(&self.collaborators.config), &self.cfg);

        if !self.subscribers.is_empty() {
            let subs = SubscriberSet::new(self.subscribers, bus.clone());
            subscriber_listener(&bus, subs);
        }

        let c = self.collaborators;
        let coordinator = Arc::new(Coordinator::new_internal(CoordinatorParts {
            resolver: c.resolver,
            linter: c.linter,
            builder: c.builder,
            classifier: c.classifier,
            indicator: c.indicator,
            notifier: c.notifier,
            config,
            bus,
            queue_capacity: self.cfg.queue_capacity_clamped(),
        }));
        coordinator.activate();
        coordinator
    }
}

/// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
///
/// Lagged receivers skip the lost events and keep going; the loop ends when every
/// bus sender is gone, then drains the subscriber workers.
fn subscriber_listener(bus: &Bus, subs: SubscriberSet) {
    use tokio::sync::broadcast::error::RecvError;

    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "subscriber listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        subs.shutdown().await;
    });
}
