//! # Fire-and-forget collaborator dispatch.
//!
//! Runs one collaborator call outside the coordinator and reports how it ended.
//!
//! ## Event flow
//! ```text
//! Ok(())          → nothing published (the dispatch event was published by the caller)
//! Err(e)          → publish CollaboratorFailed { collaborator, document, reason }
//! panic           → converted to CollaboratorError::Panicked → CollaboratorFailed
//! ```
//!
//! ## Rules
//! - The coordinator never awaits a dispatch; [`spawn`] returns immediately.
//! - Failures stop here: they are logged and published, never propagated.
//! - In-flight calls are not cancelled by coordinator teardown.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::{
    document::DocumentId,
    error::CollaboratorError,
    events::{Bus, Event, EventKind},
};

/// Spawns `fut` on the ambient runtime, reporting failures on `bus`.
pub(crate) fn spawn<F>(bus: &Bus, collaborator: &'static str, document: Option<DocumentId>, fut: F)
where
    F: Future<Output = Result<(), CollaboratorError>> + Send + 'static,
{
    let bus = bus.clone();
    tokio::spawn(async move {
        guarded(&bus, collaborator, document, fut).await;
    });
}

/// Awaits `fut`, catching errors and panics and reporting them on `bus`.
pub(crate) async fn guarded<F>(
    bus: &Bus,
    collaborator: &'static str,
    document: Option<DocumentId>,
    fut: F,
) where
    F: Future<Output = Result<(), CollaboratorError>>,
{
    let res = match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(res) => res,
        Err(panic_err) => Err(CollaboratorError::Panicked {
            info: panic_message(&*panic_err),
        }),
    };
    if let Err(e) = res {
        publish_failed(bus, collaborator, document.as_ref(), &e);
    }
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Publishes `CollaboratorFailed` with error details.
fn publish_failed(
    bus: &Bus,
    collaborator: &'static str,
    document: Option<&DocumentId>,
    err: &CollaboratorError,
) {
    tracing::debug!(collaborator, label = err.as_label(), "collaborator call failed");
    let mut ev = Event::new(EventKind::CollaboratorFailed)
        .with_collaborator(collaborator)
        .with_reason(err.as_message());
    if let Some(doc) = document {
        ev = ev.with_doc(doc);
    }
    bus.publish(ev);
}
