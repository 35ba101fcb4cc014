//! # Decision events emitted by the coordinator.
//!
//! Every decision the coordinator takes is published as an [`Event`], including the
//! decisions **not** to act. A skipped action always carries the [`Gate`] that
//! stopped it, so "lint did not fire" is traceable to a classifier, option or flag.
//!
//! The [`EventKind`] enum groups events in four categories:
//! - **Dispatch events**: a collaborator call was issued (lint, build, resolve, warn)
//! - **Debounce events**: the pending lint timer was scheduled, replaced or cancelled
//! - **Skip events**: a policy declined to act, with the reason
//! - **Runtime events**: collaborator failures, subscriber trouble, shutdown
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use docvisor::{Event, EventKind, Gate};
//!
//! let ev = Event::new(EventKind::LintSkipped)
//!     .with_document("notes.txt")
//!     .with_gate(Gate::Unmanaged);
//!
//! assert_eq!(ev.kind, EventKind::LintSkipped);
//! assert_eq!(ev.document.as_deref(), Some("notes.txt"));
//! assert_eq!(ev.gate, Some(Gate::Unmanaged));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::document::DocumentId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of coordinator events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Dispatch events ===
    /// Linter called on the root document (save).
    ///
    /// Sets: `document` (saved document), `reason` (trigger)
    LintRootDispatched,

    /// Linter called on the active document (focus change or debounce fired).
    ///
    /// Sets: `document`, `reason` (trigger)
    LintActiveDispatched,

    /// Builder called.
    ///
    /// Sets: `document`
    BuildDispatched,

    /// Resolver called.
    ///
    /// Sets: `document` (trigger, may be empty), `reason` (trigger)
    RootResolveDispatched,

    /// Deprecation warning shown.
    ///
    /// Sets: `reason` (old key)
    DeprecationWarned,

    /// User picked "Open Settings Editor" on a deprecation warning.
    ///
    /// Sets: `reason` (new key)
    SettingsOpened,

    // === Debounce events ===
    /// Edit-triggered lint deferred.
    ///
    /// Sets: `document`, `delay_ms`
    LintScheduled,

    /// A pending lint was discarded in favor of a newer one.
    ///
    /// Sets: `document` (new target)
    LintSuperseded,

    /// A pending lint was cancelled with no replacement (teardown).
    ///
    /// Sets: `document` (cancelled target)
    LintCancelled,

    // === Skip events ===
    /// A lint rule declined to act.
    ///
    /// Sets: `document`, `gate`, `reason` (trigger)
    LintSkipped,

    /// Build on save declined to act.
    ///
    /// Sets: `document`, `gate`
    BuildSkipped,

    /// Root resolution declined to act.
    ///
    /// Sets: `document`, `gate`
    RootResolveSkipped,

    // === Visibility ===
    /// Status indicator shown.
    ///
    /// Sets: `document`
    IndicatorShown,

    /// Status indicator hidden.
    ///
    /// Sets: `document` (if any editor), `gate`
    IndicatorHidden,

    // === Runtime events ===
    /// A dispatched collaborator returned an error or panicked.
    ///
    /// Sets: `collaborator`, `document` (if any), `reason`
    CollaboratorFailed,

    /// Subscriber panicked during event processing.
    ///
    /// Sets: `collaborator` (subscriber name), `reason`
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `collaborator` (subscriber name), `reason`
    SubscriberOverflow,

    /// Coordinator torn down; no more decisions will be taken.
    CoordinatorStopped,
}

/// Why a policy declined to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Classifier says the document is not a managed type.
    Unmanaged,
    /// No document to act on (no editor, or untitled buffer).
    NoDocument,
    /// The `linter` option is off.
    LinterDisabled,
    /// The `build_after_save` option is off.
    BuildAfterSaveDisabled,
    /// The builder's suppression flag is set.
    BuildSuppressed,
}

impl Gate {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Gate::Unmanaged => "unmanaged",
            Gate::NoDocument => "no_document",
            Gate::LinterDisabled => "linter_disabled",
            Gate::BuildAfterSaveDisabled => "build_after_save_disabled",
            Gate::BuildSuppressed => "build_suppressed",
        }
    }
}

/// Coordinator event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Document the decision concerns.
    pub document: Option<Arc<str>>,
    /// Gate that stopped a skipped action.
    pub gate: Option<Gate>,
    /// Debounce delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Collaborator or subscriber name.
    pub collaborator: Option<&'static str>,
    /// Human-readable reason (trigger, error text, key names).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            document: None,
            gate: None,
            delay_ms: None,
            collaborator: None,
            reason: None,
        }
    }

    /// Attaches a document.
    #[inline]
    pub fn with_document(mut self, document: impl Into<Arc<str>>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Attaches a document id (rendered as its path).
    #[inline]
    pub fn with_doc(self, document: &DocumentId) -> Self {
        self.with_document(document.to_string())
    }

    /// Attaches the gate that stopped an action.
    #[inline]
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Attaches a debounce delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a collaborator name.
    #[inline]
    pub fn with_collaborator(mut self, name: &'static str) -> Self {
        self.collaborator = Some(name);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_collaborator(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_collaborator(subscriber)
            .with_reason(info)
    }

    /// True for events the subscriber fan-out publishes about itself.
    #[inline]
    pub fn is_subscriber_diagnostic(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
        )
    }

    /// True for events describing an action that was not taken.
    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(
            self.kind,
            EventKind::LintSkipped
                | EventKind::BuildSkipped
                | EventKind::RootResolveSkipped
                | EventKind::IndicatorHidden
        ) && self.gate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::LintScheduled);
        let b = Event::new(EventKind::LintScheduled);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn delay_saturates() {
        let ev = Event::new(EventKind::LintScheduled).with_delay(Duration::from_secs(u64::MAX / 4));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }

    #[test]
    fn skip_requires_gate() {
        assert!(!Event::new(EventKind::LintSkipped).is_skip());
        assert!(Event::new(EventKind::BuildSkipped).with_gate(Gate::BuildSuppressed).is_skip());
    }

    #[test]
    fn subscriber_diagnostics() {
        assert!(Event::subscriber_overflow("log", "full").is_subscriber_diagnostic());
        assert!(Event::subscriber_panicked("log", "boom".into()).is_subscriber_diagnostic());
        assert!(!Event::new(EventKind::CollaboratorFailed).is_subscriber_diagnostic());
    }
}
