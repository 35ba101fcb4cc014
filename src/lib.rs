//! # docvisor
//!
//! **Docvisor** is the event-coordination core of an authoring-tool integration
//! (LaTeX and friends).
//!
//! The host editor reports document lifecycle events; docvisor decides whether and
//! when to lint, build, re-resolve the project root, show a status indicator and
//! warn about deprecated options. The actual work is done by collaborators the host
//! provides, so the core is testable with mocks and paused time.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   host editor
//!      │ LifecycleEvent (opened / saved / edited / active editor changed)
//!      ▼
//! ┌────────────────────┐  submit / try_submit  ┌──────────────────────────────┐
//! │ CoordinatorHandle  │ ────────────────────► │ Coordinator::run (FIFO loop) │
//! └────────────────────┘                       └──────────────┬───────────────┘
//!                                                             │ handle_event
//!                      ┌──────────────┬──────────────┬────────┴─────┬──────────────┐
//!                      ▼              ▼              ▼              ▼              ▼
//!                 lint::decide  build::decide   root::on_*   visibility::   DeprecationWarner
//!                      │              │              │        evaluate           │
//!          ┌───────────┤              │              │              │              │
//!          ▼           ▼              ▼              ▼              ▼              ▼
//!   DebounceScheduler  Linter      Builder       Resolver    StatusIndicator    Notifier
//!   (edit → lint       (spawned)   (spawned)     (spawned)   (sync)             (spawned)
//!    active, trailing)
//!
//!   every decision ──► Bus (broadcast) ──► listener ──► SubscriberSet ──► LogWriter, custom
//! ```
//!
//! ### Edit debounce
//! ```text
//! edit@0 ──► schedule(fire@300)
//! edit@100 ─► replace  (fire@400)   LintSuperseded
//! edit@250 ─► replace  (fire@550)   LintSuperseded
//!                                   ...quiet...
//! t=550 ────► LintActiveDispatched ──► Linter::lint_active(doc of edit@250)
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                         |
//! |-------------------|-----------------------------------------------------------------|--------------------------------------------|
//! | **Coordination**  | Per-event fan-out of lint, build, root and indicator decisions. | [`Coordinator`], [`CoordinatorHandle`]     |
//! | **Collaborators** | Host-provided workers behind trait objects.                     | [`Linter`], [`Builder`], [`Resolver`], ... |
//! | **Configuration** | Always-fresh options with documented defaults.                  | [`ConfigSource`], [`ConfigGate`]           |
//! | **Debounce**      | Single-slot trailing-edge timer.                                | [`DebounceScheduler`]                      |
//! | **Subscriber API**| Observe every decision, including skips and their gate.         | [`Subscribe`], [`Event`], [`Gate`]         |
//! | **Errors**        | Typed errors for collaborators, submission and the run loop.    | [`CollaboratorError`], [`SubmitError`]     |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], which renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use docvisor::{
//!     Builder, CollaboratorError, Collaborators, Coordinator, CoordinatorConfig, DocumentId,
//!     EventKind, ExtensionClassifier, LifecycleEvent, Linter, MemoryConfig, Notifier, NotifierChoice,
//!     Resolver, StatusIndicator,
//! };
//!
//! struct Noop;
//!
//! #[async_trait]
//! impl Resolver for Noop {
//!     async fn find_root(&self, _: DocumentId) -> Result<(), CollaboratorError> { Ok(()) }
//! }
//! #[async_trait]
//! impl Linter for Noop {
//!     async fn lint_root(&self) -> Result<(), CollaboratorError> { Ok(()) }
//!     async fn lint_active(&self, _: DocumentId) -> Result<(), CollaboratorError> { Ok(()) }
//! }
//! #[async_trait]
//! impl Builder for Noop {
//!     async fn build(&self, _: DocumentId) -> Result<(), CollaboratorError> { Ok(()) }
//!     fn is_build_suppressed(&self) -> bool { false }
//! }
//! impl StatusIndicator for Noop {
//!     fn show(&self) {}
//!     fn hide(&self) {}
//! }
//! #[async_trait]
//! impl Notifier for Noop {
//!     async fn warn(&self, _: String, _: Option<&'static str>) -> NotifierChoice {
//!         NotifierChoice::Dismissed
//!     }
//!     async fn open_settings(&self, _: &'static str) -> Result<(), CollaboratorError> { Ok(()) }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let noop = Arc::new(Noop);
//!     let collaborators = Collaborators {
//!         resolver: noop.clone(),
//!         linter: noop.clone(),
//!         builder: noop.clone(),
//!         classifier: Arc::new(ExtensionClassifier::default()),
//!         config: Arc::new(MemoryConfig::new()),
//!         indicator: noop.clone(),
//!         notifier: noop,
//!     };
//!
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn docvisor::Subscribe>> = vec![Arc::new(docvisor::LogWriter::new())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn docvisor::Subscribe>> = Vec::new();
//!
//!     let coordinator = Coordinator::builder(collaborators, CoordinatorConfig::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let token = CancellationToken::new();
//!     let mut events = coordinator.subscribe();
//!     let runner = Arc::clone(&coordinator);
//!     let stop = token.clone();
//!     let run = tokio::spawn(async move { runner.run(stop).await });
//!
//!     let handle = coordinator.handle();
//!     handle.submit(LifecycleEvent::DocumentSaved(DocumentId::new("thesis.tex"))).await?;
//!
//!     // Linting is off by default, the build goes out.
//!     while events.recv().await?.kind != EventKind::BuildDispatched {}
//!
//!     token.cancel();
//!     run.await??;
//!     assert!(coordinator.is_stopped());
//!     Ok(())
//! }
//! ```

mod collaborators;
mod config;
mod core;
mod document;
mod error;
mod events;
mod policies;
mod scheduler;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Coordinator, CoordinatorBuilder, CoordinatorConfig, CoordinatorHandle};
pub use collaborators::{
    Builder, Classifier, Collaborators, ExtensionClassifier, Linter, Notifier, NotifierChoice,
    Resolver, StatusIndicator,
};
pub use config::{ConfigGate, ConfigSource, ConfigValue, MemoryConfig, keys};
pub use document::{ActiveEditor, DocumentId, LifecycleEvent};
pub use error::{CollaboratorError, CoordinatorError, SubmitError};
pub use events::{Bus, Event, EventKind, Gate};
pub use policies::{
    BuildDecision, DeprecationWarner, LintDecision, LintTrigger, RootDecision, VisibilityState,
    build, deprecation, lint, root, visibility,
};
pub use scheduler::{DebounceScheduler, Scheduled};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose the built-in tracing subscriber.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
