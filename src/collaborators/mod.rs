//! # External collaborators.
//!
//! The coordinator decides *whether* and *when*; collaborators do the work. Each
//! collaborator is a trait object with an opaque contract:
//!
//! | collaborator        | called on                                   | awaited by coordinator |
//! |---------------------|---------------------------------------------|------------------------|
//! | [`Resolver`]        | open (managed), focus change (editor)       | no (spawned)           |
//! | [`Linter`]          | save, focus change, edit (debounced)        | no (spawned)           |
//! | [`Builder`]         | save                                        | no (spawned)           |
//! | [`Classifier`]      | every decision                              | sync                   |
//! | [`StatusIndicator`] | focus change                                | sync                   |
//! | [`Notifier`]        | deprecated keys, once per key               | in a spawned task      |
//!
//! Async collaborators return `Result<(), CollaboratorError>`; errors and panics are
//! reported on the event bus and never reach the coordinator.

mod classifier;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ConfigSource;
use crate::document::DocumentId;
use crate::error::CollaboratorError;

pub use classifier::ExtensionClassifier;

/// Determines the project's root document.
///
/// Must be idempotent: the coordinator calls it on every qualifying event without
/// checking whether the root is already known.
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Re-determines the root, triggered by `trigger` being opened or focused.
    async fn find_root(&self, trigger: DocumentId) -> Result<(), CollaboratorError>;
}

/// Performs lint analysis.
///
/// May be invoked concurrently with itself (an immediate lint can overlap a debounced one).
#[async_trait]
pub trait Linter: Send + Sync + 'static {
    /// Lints the whole project starting at the resolved root document.
    async fn lint_root(&self) -> Result<(), CollaboratorError>;

    /// Lints a single document (the active one).
    async fn lint_active(&self, document: DocumentId) -> Result<(), CollaboratorError>;
}

/// Performs builds and owns the build-suppression flag.
#[async_trait]
pub trait Builder: Send + Sync + 'static {
    /// Builds the project containing `document`.
    async fn build(&self, document: DocumentId) -> Result<(), CollaboratorError>;

    /// Current value of the suppression flag.
    ///
    /// Set by the builder itself while it performs internal saves, so a save it caused
    /// does not trigger another build. The coordinator only reads it.
    fn is_build_suppressed(&self) -> bool;
}

/// Answers whether a path is a managed document type.
pub trait Classifier: Send + Sync + 'static {
    fn is_managed(&self, path: &Path) -> bool;
}

/// Status bar item (or equivalent) shown while a managed document is focused.
pub trait StatusIndicator: Send + Sync + 'static {
    fn show(&self);
    fn hide(&self);
}

/// What the user did with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierChoice {
    /// Closed or ignored.
    Dismissed,
    /// Picked the offered follow-up action.
    Selected,
}

/// User-facing notifications.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Shows a dismissable warning with an optional single follow-up action and
    /// resolves to the user's choice.
    async fn warn(&self, message: String, action: Option<&'static str>) -> NotifierChoice;

    /// Opens the host's settings editor filtered to `key`.
    async fn open_settings(&self, key: &'static str) -> Result<(), CollaboratorError>;
}

/// Bundle of collaborators handed to [`Coordinator::builder`](crate::Coordinator::builder).
#[derive(Clone)]
pub struct Collaborators {
    pub resolver: Arc<dyn Resolver>,
    pub linter: Arc<dyn Linter>,
    pub builder: Arc<dyn Builder>,
    pub classifier: Arc<dyn Classifier>,
    pub config: Arc<dyn ConfigSource>,
    pub indicator: Arc<dyn StatusIndicator>,
    pub notifier: Arc<dyn Notifier>,
}
