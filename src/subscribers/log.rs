//! # LogWriter: events as `tracing` records
//!
//! A subscriber that renders every [`Event`] as a structured `tracing` record under
//! the `docvisor` target. Dispatches and skips are `debug`, debounce bookkeeping is
//! `trace`, failures are `warn`.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! DEBUG docvisor: lint root dispatched document="main.tex" trigger="saved"
//! TRACE docvisor: lint scheduled document="main.tex" delay_ms=300
//! DEBUG docvisor: build skipped document="main.tex" gate="build_suppressed"
//!  WARN docvisor: collaborator failed collaborator="linter" reason="error: chktex missing"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let document = e.document.as_deref().unwrap_or("");
        let reason = e.reason.as_deref().unwrap_or("");
        let gate = e.gate.map(|g| g.as_label()).unwrap_or("");

        match e.kind {
            EventKind::LintRootDispatched => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, trigger = reason, "lint root dispatched");
            }
            EventKind::LintActiveDispatched => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, trigger = reason, "lint active dispatched");
            }
            EventKind::BuildDispatched => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, "build dispatched");
            }
            EventKind::RootResolveDispatched => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, trigger = reason, "root resolution dispatched");
            }
            EventKind::DeprecationWarned => {
                tracing::info!(target: "docvisor", seq = e.seq, key = reason, "deprecated option warned");
            }
            EventKind::SettingsOpened => {
                tracing::info!(target: "docvisor", seq = e.seq, key = reason, "settings editor opened");
            }
            EventKind::LintScheduled => {
                tracing::trace!(target: "docvisor", seq = e.seq, document, delay_ms = e.delay_ms.unwrap_or(0), "lint scheduled");
            }
            EventKind::LintSuperseded => {
                tracing::trace!(target: "docvisor", seq = e.seq, document, "pending lint superseded");
            }
            EventKind::LintCancelled => {
                tracing::trace!(target: "docvisor", seq = e.seq, "pending lint cancelled");
            }
            EventKind::LintSkipped => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, gate, trigger = reason, "lint skipped");
            }
            EventKind::BuildSkipped => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, gate, "build skipped");
            }
            EventKind::RootResolveSkipped => {
                tracing::debug!(target: "docvisor", seq = e.seq, document, gate, "root resolution skipped");
            }
            EventKind::IndicatorShown => {
                tracing::trace!(target: "docvisor", seq = e.seq, document, "indicator shown");
            }
            EventKind::IndicatorHidden => {
                tracing::trace!(target: "docvisor", seq = e.seq, document, gate, "indicator hidden");
            }
            EventKind::CollaboratorFailed => {
                tracing::warn!(
                    target: "docvisor",
                    seq = e.seq,
                    collaborator = e.collaborator.unwrap_or("unknown"),
                    document,
                    reason,
                    "collaborator failed"
                );
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(
                    target: "docvisor",
                    subscriber = e.collaborator.unwrap_or("unknown"),
                    info = reason,
                    "subscriber panicked"
                );
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(
                    target: "docvisor",
                    subscriber = e.collaborator.unwrap_or("unknown"),
                    reason,
                    "subscriber dropped event"
                );
            }
            EventKind::CoordinatorStopped => {
                tracing::info!(target: "docvisor", seq = e.seq, "coordinator stopped");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
