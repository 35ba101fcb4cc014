#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docvisor::{
    ActiveEditor, Builder, CollaboratorError, Collaborators, Coordinator, CoordinatorConfig,
    DocumentId, Event, ExtensionClassifier, LifecycleEvent, Linter, MemoryConfig, Notifier,
    NotifierChoice, Resolver, StatusIndicator,
};
use tokio::sync::broadcast;
use tokio::time::Instant;

/// One observed collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindRoot(String),
    LintRoot,
    LintActive(String),
    Build(String),
    Show,
    Hide,
    Warn(String),
    OpenSettings(&'static str),
}

/// Recording stand-in for every collaborator.
pub struct Mock {
    calls: Mutex<Vec<(Instant, Call)>>,
    /// Value returned by `Builder::is_build_suppressed`.
    pub suppressed: AtomicBool,
    /// Resolver, linter and builder return an error.
    pub fail: AtomicBool,
    /// Builder panics.
    pub panic_builder: AtomicBool,
    /// Notifier answers `Selected` instead of `Dismissed`.
    pub select_action: AtomicBool,
}

impl Mock {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            suppressed: AtomicBool::new(false),
            fail: AtomicBool::new(false),
            panic_builder: AtomicBool::new(false),
            select_action: AtomicBool::new(false),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }

    fn outcome(&self) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(CollaboratorError::failed("boom"))
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|(_, c)| pred(c)).count()
    }

    pub fn lint_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::LintRoot | Call::LintActive(_)))
    }

    pub fn build_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Build(_)))
    }

    pub fn warn_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Warn(_)))
    }
}

#[async_trait]
impl Resolver for Mock {
    async fn find_root(&self, trigger: DocumentId) -> Result<(), CollaboratorError> {
        self.record(Call::FindRoot(trigger.to_string()));
        self.outcome()
    }
}

#[async_trait]
impl Linter for Mock {
    async fn lint_root(&self) -> Result<(), CollaboratorError> {
        self.record(Call::LintRoot);
        self.outcome()
    }

    async fn lint_active(&self, document: DocumentId) -> Result<(), CollaboratorError> {
        self.record(Call::LintActive(document.to_string()));
        self.outcome()
    }
}

#[async_trait]
impl Builder for Mock {
    async fn build(&self, document: DocumentId) -> Result<(), CollaboratorError> {
        self.record(Call::Build(document.to_string()));
        if self.panic_builder.load(Ordering::SeqCst) {
            panic!("latexmk crashed");
        }
        self.outcome()
    }

    fn is_build_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }
}

impl StatusIndicator for Mock {
    fn show(&self) {
        self.record(Call::Show);
    }

    fn hide(&self) {
        self.record(Call::Hide);
    }
}

#[async_trait]
impl Notifier for Mock {
    async fn warn(&self, message: String, _action: Option<&'static str>) -> NotifierChoice {
        self.record(Call::Warn(message));
        if self.select_action.load(Ordering::SeqCst) {
            NotifierChoice::Selected
        } else {
            NotifierChoice::Dismissed
        }
    }

    async fn open_settings(&self, key: &'static str) -> Result<(), CollaboratorError> {
        self.record(Call::OpenSettings(key));
        Ok(())
    }
}

pub struct Harness {
    pub coordinator: Arc<Coordinator>,
    pub mock: Arc<Mock>,
    pub config: Arc<MemoryConfig>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(cfg: CoordinatorConfig) -> Self {
        Self::with_options(cfg, &[])
    }

    /// Options present before the coordinator is built.
    pub fn with_options(cfg: CoordinatorConfig, options: &[(&str, &str)]) -> Self {
        let mock = Arc::new(Mock::new());
        let config = Arc::new(MemoryConfig::new());
        for (key, value) in options {
            config.set(*key, *value);
        }
        let collaborators = Collaborators {
            resolver: mock.clone(),
            linter: mock.clone(),
            builder: mock.clone(),
            classifier: Arc::new(ExtensionClassifier::default()),
            config: config.clone(),
            indicator: mock.clone(),
            notifier: mock.clone(),
        };
        let coordinator = Coordinator::builder(collaborators, cfg).build();
        Self {
            coordinator,
            mock,
            config,
        }
    }

    pub fn send(&self, event: LifecycleEvent) {
        self.coordinator.handle_event(event);
    }
}

pub fn saved(path: &str) -> LifecycleEvent {
    LifecycleEvent::DocumentSaved(DocumentId::new(path))
}

pub fn opened(path: &str) -> LifecycleEvent {
    LifecycleEvent::DocumentOpened(DocumentId::new(path))
}

pub fn edited(path: &str) -> LifecycleEvent {
    LifecycleEvent::DocumentEdited(DocumentId::new(path))
}

pub fn focused(path: Option<&str>) -> LifecycleEvent {
    LifecycleEvent::ActiveEditorChanged(path.map(ActiveEditor::new))
}

/// Lets spawned collaborator calls run without moving the paused clock far.
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(1)).await;
}

/// Everything currently buffered on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}
