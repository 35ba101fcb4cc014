//! Coordinator events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to decisions taken by the coordinator.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`Gate`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Coordinator` (decisions), `DebounceScheduler` timer tasks,
//!   `core::dispatch` tasks (collaborator failures), `SubscriberSet` workers.
//! - **Consumers**: the coordinator's listener (fans out to `SubscriberSet`) and any
//!   receiver obtained from [`Coordinator::subscribe`](crate::Coordinator::subscribe).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, Gate};
