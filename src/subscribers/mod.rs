//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] fan-out
//! for events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Coordinator ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//!                                                             │
//!                                               ┌─────────────┼─────────────┐
//!                                               ▼             ▼             ▼
//!                                           LogWriter      Metrics       Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use docvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct SkipCounter;
//!
//! #[async_trait]
//! impl Subscribe for SkipCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.is_skip() {
//!             // increment counter keyed by event.gate
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
