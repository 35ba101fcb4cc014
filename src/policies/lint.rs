//! # Lint dispatch policy.
//!
//! Decides, per trigger, whether the linter runs now, later, or not at all.
//!
//! ```text
//! classifier(doc) == false      → Skip(Unmanaged)
//! linter == false               → Skip(LinterDisabled)
//! Saved                         → LintRoot            (immediate)
//! ActiveChanged                 → LintActive(doc)     (immediate)
//! Edited                        → Debounce(doc, linter_interval)
//! ```
//!
//! Saves and focus switches are rare and want immediate feedback; edits arrive in
//! bursts and are coalesced.

use std::time::Duration;

use crate::collaborators::Classifier;
use crate::config::ConfigGate;
use crate::document::DocumentId;
use crate::events::Gate;

/// Which lifecycle event asked for a lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintTrigger {
    Saved,
    ActiveChanged,
    Edited,
}

impl LintTrigger {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            LintTrigger::Saved => "saved",
            LintTrigger::ActiveChanged => "active_changed",
            LintTrigger::Edited => "edited",
        }
    }
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintDecision {
    /// Do nothing.
    Skip(Gate),
    /// Lint the project from its root, now.
    LintRoot,
    /// Lint the given document, now.
    LintActive(DocumentId),
    /// Lint the given document once edits have been quiet for `interval`.
    Debounce {
        document: DocumentId,
        interval: Duration,
    },
}

/// Evaluates the lint rules for one event.
///
/// Options are read from `config` at call time; only `Edited` reads the interval.
pub fn decide(
    trigger: LintTrigger,
    document: &DocumentId,
    classifier: &dyn Classifier,
    config: &ConfigGate,
) -> LintDecision {
    if document.is_empty() {
        return LintDecision::Skip(Gate::NoDocument);
    }
    if !classifier.is_managed(document.as_path()) {
        return LintDecision::Skip(Gate::Unmanaged);
    }
    if !config.linter_enabled() {
        return LintDecision::Skip(Gate::LinterDisabled);
    }
    match trigger {
        LintTrigger::Saved => LintDecision::LintRoot,
        LintTrigger::ActiveChanged => LintDecision::LintActive(document.clone()),
        LintTrigger::Edited => LintDecision::Debounce {
            document: document.clone(),
            interval: config.linter_interval(),
        },
    }
}
