//! # Event bus for broadcasting coordinator decisions.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking publishing from the coordinator, the debounce timer task and
//! spawned collaborator dispatches.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                       Subscriber (one):
//!   Coordinator::handle ──┐
//!   debounce timer task ──┼──────► Bus ───────► listener ────► SubscriberSet
//!   dispatch tasks      ──┘  (broadcast chan)  (in Coordinator)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no active receivers at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for coordinator events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn publish_without_receivers_is_dropped() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::BuildDispatched));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::CoordinatorStopped));
        assert_eq!(rx.recv().await.unwrap().kind, EventKind::CoordinatorStopped);
        assert!(rx.try_recv().is_err());
    }
}
