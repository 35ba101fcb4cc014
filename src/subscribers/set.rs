//! # Non-blocking event fan-out to multiple subscribers.
//!
//! Provides [`SubscriberSet`], which distributes events to multiple subscribers
//! concurrently without blocking the coordinator.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_event()
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - **No cross-subscriber ordering**: A may process event N while B processes N+5
//! - **Overflow**: event dropped for that subscriber only, `SubscriberOverflow` published
//! - **No feedback**: a subscriber never receives diagnostics naming itself, and a panic
//!   while handling a diagnostic is only traced, so a failing subscriber cannot feed itself
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Per-subscriber FIFO**: each subscriber sees events in order
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber panics while holding a lock.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out over multiple event subscribers with per-subscriber queues and workers.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// Must be called within a tokio runtime. Minimum queue capacity is 1.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = crate::core::panic_message(&*panic_err);
                        tracing::warn!(subscriber = name, %info, seq = ev.seq, "subscriber panicked");
                        if !ev.is_subscriber_diagnostic() {
                            bus_for_worker.publish(Event::subscriber_panicked(name, info));
                        }
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all subscribers (clones the event once).
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<Event>` to all subscribers.
    ///
    /// Diagnostics are not re-published if they themselves overflow, and are never
    /// delivered to the subscriber they name.
    pub fn emit_arc(&self, event: Arc<Event>) {
        let diagnostic = event.is_subscriber_diagnostic();

        for channel in &self.channels {
            if diagnostic && event.collaborator == Some(channel.name) {
                continue;
            }
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            tracing::debug!(subscriber = channel.name, reason, seq = event.seq, "event dropped");
            if !diagnostic {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// Drops all senders, then awaits every worker draining its queue.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Panicky;

    #[async_trait]
    impl Subscribe for Panicky {
        async fn on_event(&self, _event: &Event) {
            panic!("subscriber blew up");
        }

        fn name(&self) -> &'static str {
            "panicky"
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<EventKind>>);

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.kind);
        }

        fn name(&self) -> &'static str {
            "collect"
        }

        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn panics_are_isolated_and_reported() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![Arc::new(Panicky), collect.clone()], bus.clone());

        set.emit(&Event::new(EventKind::BuildDispatched));
        set.shutdown().await;

        assert_eq!(*collect.0.lock().unwrap(), vec![EventKind::BuildDispatched]);
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.collaborator, Some("panicky"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber blew up"));
    }

    #[tokio::test]
    async fn full_queue_publishes_overflow() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(vec![Arc::new(Collect::default())], bus.clone());

        set.emit(&Event::new(EventKind::LintScheduled));
        set.emit(&Event::new(EventKind::LintSuperseded));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberOverflow);
        assert_eq!(ev.collaborator, Some("collect"));
        assert_eq!(ev.reason.as_deref(), Some("full"));
        assert_eq!(set.len(), 1);
    }

    struct AlwaysPanics {
        name: &'static str,
        calls: AtomicUsize,
    }

    impl AlwaysPanics {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Subscribe for AlwaysPanics {
        async fn on_event(&self, _event: &Event) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            panic!("{} cannot cope", self.name);
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    /// Wires the set back onto the bus the way the coordinator's listener does.
    fn forward(bus: &Bus, set: Arc<SubscriberSet>) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }

    #[tokio::test]
    async fn panicking_subscriber_is_not_fed_its_own_panics() {
        let bus = Bus::new(64);
        let first = AlwaysPanics::new("first");
        let set = Arc::new(SubscriberSet::new(vec![first.clone()], bus.clone()));
        forward(&bus, set);

        bus.publish(Event::new(EventKind::LintSkipped));
        bus.publish(Event::new(EventKind::BuildDispatched));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(first.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn panicking_subscribers_do_not_ping_pong() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let first = AlwaysPanics::new("first");
        let second = AlwaysPanics::new("second");
        let set = Arc::new(SubscriberSet::new(
            vec![first.clone(), second.clone()],
            bus.clone(),
        ));
        forward(&bus, set);

        bus.publish(Event::new(EventKind::LintSkipped));
        bus.publish(Event::new(EventKind::BuildDispatched));
        tokio::time::sleep(Duration::from_millis(100)).await;

        // two decisions plus the other subscriber's two panic reports
        assert_eq!(first.calls.load(Ordering::SeqCst), 4);
        assert_eq!(second.calls.load(Ordering::SeqCst), 4);

        let panics = std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|e| e.kind == EventKind::SubscriberPanicked)
            .count();
        assert_eq!(panics, 4);
    }

    #[tokio::test]
    async fn diagnostics_skip_the_subscriber_they_name() {
        let bus = Bus::new(16);
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![collect.clone()], bus.clone());

        set.emit(&Event::subscriber_panicked("collect", "boom".into()));
        set.emit(&Event::subscriber_panicked("other", "boom".into()));
        set.shutdown().await;

        assert_eq!(*collect.0.lock().unwrap(), vec![EventKind::SubscriberPanicked]);
    }
}
