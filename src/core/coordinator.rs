//! # Coordinator: turns lifecycle events into collaborator calls.
//!
//! The [`Coordinator`] owns the event bus, the lint debounce timer, the deprecation
//! warner and the collaborator handles. It is built once (see
//! [`CoordinatorBuilder`](crate::CoordinatorBuilder)) and shared by `Arc`; there is no
//! global instance.
//!
//! ## Fan-out per event
//! ```text
//! DocumentOpened(doc)
//!   ├─► root::on_opened            ──► spawn Resolver::find_root(doc)
//!   └─► (managed) deprecations     ──► spawn Notifier::warn → open_settings?
//!
//! DocumentSaved(doc)
//!   ├─► lint::decide(Saved)        ──► spawn Linter::lint_root()
//!   └─► build::decide              ──► spawn Builder::build(doc)
//!
//! DocumentEdited(doc)
//!   └─► lint::decide(Edited)       ──► DebounceScheduler::schedule(interval, lint_active(doc))
//!
//! ActiveEditorChanged(editor?)
//!   ├─► visibility::evaluate       ──► StatusIndicator::show / hide
//!   ├─► root::on_editor_changed    ──► spawn Resolver::find_root(doc)
//!   └─► lint::decide(ActiveChanged)──► spawn Linter::lint_active(doc)
//! ```
//!
//! ## Rules
//! - [`Coordinator::handle_event`] is synchronous: one event is decided at a time and
//!   nothing is awaited. Collaborator work runs in spawned tasks.
//! - Options are re-read on every decision (no snapshot across events).
//! - Every decision, including "do nothing", is published on the bus.
//! - After [`Coordinator::shutdown`] the pending lint is cancelled and further
//!   events are ignored.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::{
    collaborators::{Builder, Classifier, Linter, Notifier, NotifierChoice, Resolver, StatusIndicator},
    config::{ConfigGate, keys},
    core::dispatch,
    document::{ActiveEditor, DocumentId, LifecycleEvent},
    error::{CoordinatorError, SubmitError},
    events::{Bus, Event, EventKind, Gate},
    policies::{
        BuildDecision, DeprecationWarner, LintDecision, LintTrigger, RootDecision, VisibilityState,
        build, lint, root, visibility,
    },
    scheduler::DebounceScheduler,
};

/// Handle for delivering lifecycle events to a running coordinator.
///
/// Events submitted through one handle are decided in submission order.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<LifecycleEvent>,
}

impl CoordinatorHandle {
    /// Submit an event (async, waits if the queue is full).
    pub async fn submit(&self, event: LifecycleEvent) -> Result<(), SubmitError> {
        self.tx.send(event).await.map_err(|_| SubmitError::Closed)
    }

    /// Try to submit without waiting (fails if the queue is full).
    pub fn try_submit(&self, event: LifecycleEvent) -> Result<(), SubmitError> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

/// Event-coordination core.
pub struct Coordinator {
    resolver: Arc<dyn Resolver>,
    linter: Arc<dyn Linter>,
    builder: Arc<dyn Builder>,
    classifier: Arc<dyn Classifier>,
    indicator: Arc<dyn StatusIndicator>,
    notifier: Arc<dyn Notifier>,

    config: ConfigGate,
    bus: Bus,

    lint_timer: DebounceScheduler,
    warner: DeprecationWarner,
    visibility: Mutex<VisibilityState>,
    stopped: AtomicBool,

    tx: mpsc::Sender<LifecycleEvent>,
    rx: Mutex<Option<mpsc::Receiver<LifecycleEvent>>>,
}

/// Parts assembled by the builder.
pub(crate) struct CoordinatorParts {
    pub resolver: Arc<dyn Resolver>,
    pub linter: Arc<dyn Linter>,
    pub builder: Arc<dyn Builder>,
    pub classifier: Arc<dyn Classifier>,
    pub indicator: Arc<dyn StatusIndicator>,
    pub notifier: Arc<dyn Notifier>,
    pub config: ConfigGate,
    pub bus: Bus,
    pub queue_capacity: usize,
}

impl Coordinator {
    pub(crate) fn new_internal(parts: CoordinatorParts) -> Self {
        let (tx, rx) = mpsc::channel(parts.queue_capacity.max(1));
        Self {
            resolver: parts.resolver,
            linter: parts.linter,
            builder: parts.builder,
            classifier: parts.classifier,
            indicator: parts.indicator,
            notifier: parts.notifier,
            config: parts.config,
            bus: parts.bus,
            lint_timer: DebounceScheduler::new(),
            warner: DeprecationWarner::new(),
            visibility: Mutex::new(VisibilityState::Hidden),
            stopped: AtomicBool::new(false),
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Returns a handle for submitting events to [`Coordinator::run`].
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle {
            tx: self.tx.clone(),
        }
    }

    /// Creates a receiver that observes subsequent decision events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The option accessor used for every decision.
    pub fn config(&self) -> &ConfigGate {
        &self.config
    }

    /// Last indicator state applied (initially `Hidden`).
    pub fn visibility(&self) -> VisibilityState {
        *self.visibility.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Target of the pending debounced lint, if any.
    pub fn pending_lint(&self) -> Option<DocumentId> {
        self.lint_timer.pending_target()
    }

    /// Deprecated keys warned about so far in this process.
    pub fn warned_keys(&self) -> Vec<&'static str> {
        self.warner.warned()
    }

    /// True once [`Coordinator::shutdown`] has run.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Process-start check of deprecated options.
    ///
    /// Run by [`CoordinatorBuilder::build`](crate::CoordinatorBuilder::build). Calling it
    /// again only warns about keys that were set since and not yet warned.
    pub fn activate(&self) {
        if self.is_stopped() {
            return;
        }
        self.check_deprecations();
    }

    /// Decides one lifecycle event.
    ///
    /// Must be called within a tokio runtime. Never blocks and never fails; events
    /// arriving after shutdown are ignored.
    pub fn handle_event(&self, event: LifecycleEvent) {
        if self.is_stopped() {
            tracing::debug!(event = event.as_label(), "event ignored after shutdown");
            return;
        }
        match event {
            LifecycleEvent::DocumentOpened(doc) => {
                self.resolve_root(
                    root::on_opened(&doc, self.classifier.as_ref()),
                    "opened",
                    Some(&doc),
                );
                if !doc.is_empty() && self.classifier.is_managed(doc.as_path()) {
                    self.check_deprecations();
                }
            }
            LifecycleEvent::DocumentSaved(doc) => {
                self.lint(LintTrigger::Saved, &doc);
                self.build(&doc);
            }
            LifecycleEvent::DocumentEdited(doc) => {
                self.lint(LintTrigger::Edited, &doc);
            }
            LifecycleEvent::ActiveEditorChanged(editor) => {
                self.update_visibility(editor.as_ref());
                self.resolve_root(
                    root::on_editor_changed(editor.as_ref()),
                    "active_changed",
                    editor.as_ref().map(|e| &e.document),
                );
                match &editor {
                    Some(editor) => self.lint(LintTrigger::ActiveChanged, &editor.document),
                    None => self.bus.publish(
                        Event::new(EventKind::LintSkipped)
                            .with_gate(Gate::NoDocument)
                            .with_reason(LintTrigger::ActiveChanged.as_label()),
                    ),
                }
            }
        }
    }

    /// Drains submitted events in FIFO order until `token` is cancelled, then shuts down.
    ///
    /// Only one run loop may ever own the queue.
    pub async fn run(&self, token: CancellationToken) -> Result<(), CoordinatorError> {
        let mut rx = self
            .rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(CoordinatorError::AlreadyRunning)?;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                ev = rx.recv() => match ev {
                    Some(ev) => self.handle_event(ev),
                    None => break,
                },
            }
        }
        self.shutdown();
        Ok(())
    }

    /// Tears the coordinator down: cancels the pending lint timer and stops deciding.
    ///
    /// Idempotent. In-flight collaborator calls are left to finish.
    pub fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(target) = self.lint_timer.cancel_pending() {
            self.bus
                .publish(Event::new(EventKind::LintCancelled).with_doc(&target));
        }
        self.bus.publish(Event::new(EventKind::CoordinatorStopped));
    }

    fn lint(&self, trigger: LintTrigger, doc: &DocumentId) {
        let decision = lint::decide(trigger, doc, self.classifier.as_ref(), &self.config);
        match decision {
            LintDecision::Skip(gate) => {
                self.bus.publish(
                    Event::new(EventKind::LintSkipped)
                        .with_doc(doc)
                        .with_gate(gate)
                        .with_reason(trigger.as_label()),
                );
            }
            LintDecision::LintRoot => {
                self.bus.publish(
                    Event::new(EventKind::LintRootDispatched)
                        .with_doc(doc)
                        .with_reason(trigger.as_label()),
                );
                let linter = Arc::clone(&self.linter);
                dispatch::spawn(&self.bus, "linter", Some(doc.clone()), async move {
                    linter.lint_root().await
                });
            }
            LintDecision::LintActive(target) => {
                self.bus.publish(
                    Event::new(EventKind::LintActiveDispatched)
                        .with_doc(&target)
                        .with_reason(trigger.as_label()),
                );
                let linter = Arc::clone(&self.linter);
                dispatch::spawn(&self.bus, "linter", Some(target.clone()), async move {
                    linter.lint_active(target).await
                });
            }
            LintDecision::Debounce { document, interval } => {
                let linter = Arc::clone(&self.linter);
                let bus = self.bus.clone();
                let target = document.clone();
                let action = async move {
                    bus.publish(
                        Event::new(EventKind::LintActiveDispatched)
                            .with_doc(&target)
                            .with_reason(LintTrigger::Edited.as_label()),
                    );
                    let failed_doc = Some(target.clone());
                    dispatch::guarded(&bus, "linter", failed_doc, linter.lint_active(target)).await;
                };

                let scheduled = self.lint_timer.schedule(interval, document.clone(), action);
                if let Some(previous) = scheduled.replaced {
                    self.bus.publish(
                        Event::new(EventKind::LintSuperseded)
                            .with_doc(&document)
                            .with_reason(previous.to_string()),
                    );
                }
                self.bus.publish(
                    Event::new(EventKind::LintScheduled)
                        .with_doc(&document)
                        .with_delay(interval),
                );
            }
        }
    }

    fn build(&self, doc: &DocumentId) {
        let decision = build::decide(
            doc,
            self.classifier.as_ref(),
            &self.config,
            self.builder.as_ref(),
        );
        match decision {
            BuildDecision::Skip(gate) => {
                self.bus.publish(
                    Event::new(EventKind::BuildSkipped)
                        .with_doc(doc)
                        .with_gate(gate),
                );
            }
            BuildDecision::Build(target) => {
                self.bus
                    .publish(Event::new(EventKind::BuildDispatched).with_doc(&target));
                let builder = Arc::clone(&self.builder);
                dispatch::spawn(&self.bus, "builder", Some(target.clone()), async move {
                    builder.build(target).await
                });
            }
        }
    }

    fn resolve_root(
        &self,
        decision: RootDecision,
        trigger: &'static str,
        doc: Option<&DocumentId>,
    ) {
        match decision {
            RootDecision::Skip(gate) => {
                let mut ev = Event::new(EventKind::RootResolveSkipped)
                    .with_gate(gate)
                    .with_reason(trigger);
                if let Some(doc) = doc {
                    ev = ev.with_doc(doc);
                }
                self.bus.publish(ev);
            }
            RootDecision::Resolve(target) => {
                self.bus.publish(
                    Event::new(EventKind::RootResolveDispatched)
                        .with_doc(&target)
                        .with_reason(trigger),
                );
                let resolver = Arc::clone(&self.resolver);
                dispatch::spawn(&self.bus, "resolver", Some(target.clone()), async move {
                    resolver.find_root(target).await
                });
            }
        }
    }

    fn update_visibility(&self, editor: Option<&ActiveEditor>) {
        let (state, gate) = visibility::evaluate(editor, self.classifier.as_ref());
        let indicator = &self.indicator;
        let applied = std::panic::catch_unwind(AssertUnwindSafe(|| match state {
            VisibilityState::Shown => indicator.show(),
            VisibilityState::Hidden => indicator.hide(),
        }));

        *self.visibility.lock().unwrap_or_else(PoisonError::into_inner) = state;

        let mut ev = match (state, gate) {
            (VisibilityState::Shown, _) => Event::new(EventKind::IndicatorShown),
            (VisibilityState::Hidden, Some(gate)) => {
                Event::new(EventKind::IndicatorHidden).with_gate(gate)
            }
            (VisibilityState::Hidden, None) => Event::new(EventKind::IndicatorHidden),
        };
        if let Some(editor) = editor {
            ev = ev.with_doc(&editor.document);
        }
        self.bus.publish(ev);

        if let Err(panic_err) = applied {
            self.bus.publish(
                Event::new(EventKind::CollaboratorFailed)
                    .with_collaborator("indicator")
                    .with_reason(format!("panic: {}", dispatch::panic_message(&*panic_err))),
            );
        }
    }

    fn check_deprecations(&self) {
        for deprecation in self.warner.take_due(&self.config) {
            self.bus.publish(
                Event::new(EventKind::DeprecationWarned).with_reason(deprecation.old_key),
            );
            let notifier = Arc::clone(&self.notifier);
            let bus = self.bus.clone();
            dispatch::spawn(&self.bus, "notifier", None, async move {
                let choice = notifier
                    .warn(deprecation.warning(), Some(keys::OPEN_SETTINGS_ACTION))
                    .await;
                if choice != NotifierChoice::Selected {
                    return Ok(());
                }
                bus.publish(Event::new(EventKind::SettingsOpened).with_reason(deprecation.new_key));
                notifier.open_settings(deprecation.new_key).await
            });
        }
    }
}
