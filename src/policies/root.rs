//! # Root resolution trigger.
//!
//! The resolver is idempotent and cheap when nothing changed, so the coordinator
//! keeps no record of the last root: every qualifying event yields one call.
//!
//! ```text
//! DocumentOpened(doc), managed       → Resolve(doc)
//! DocumentOpened(doc), untitled      → Skip(NoDocument)
//! DocumentOpened(doc), unmanaged     → Skip(Unmanaged)
//! ActiveEditorChanged(Some(editor))  → Resolve(editor.document)   (any document)
//! ActiveEditorChanged(None)          → Skip(NoDocument)
//! ```

use crate::collaborators::Classifier;
use crate::document::{ActiveEditor, DocumentId};
use crate::events::Gate;

/// Outcome of the root resolution rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootDecision {
    Skip(Gate),
    Resolve(DocumentId),
}

/// Rule for a newly opened document.
pub fn on_opened(document: &DocumentId, classifier: &dyn Classifier) -> RootDecision {
    if document.is_empty() {
        return RootDecision::Skip(Gate::NoDocument);
    }
    if !classifier.is_managed(document.as_path()) {
        return RootDecision::Skip(Gate::Unmanaged);
    }
    RootDecision::Resolve(document.clone())
}

/// Rule for a focus change.
pub fn on_editor_changed(editor: Option<&ActiveEditor>) -> RootDecision {
    match editor {
        Some(editor) => RootDecision::Resolve(editor.document.clone()),
        None => RootDecision::Skip(Gate::NoDocument),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::ExtensionClassifier;

    #[test]
    fn opened_requires_managed_document() {
        let cls = ExtensionClassifier::default();
        let doc = DocumentId::new("main.tex");
        assert_eq!(on_opened(&doc, &cls), RootDecision::Resolve(doc.clone()));
        assert_eq!(
            on_opened(&DocumentId::new("notes.txt"), &cls),
            RootDecision::Skip(Gate::Unmanaged)
        );
    }

    #[test]
    fn untitled_document_has_no_document_gate() {
        let cls = ExtensionClassifier::default();
        assert_eq!(
            on_opened(&DocumentId::new(""), &cls),
            RootDecision::Skip(Gate::NoDocument)
        );
    }

    #[test]
    fn any_present_editor_resolves() {
        let editor = ActiveEditor::new("notes.txt");
        assert_eq!(
            on_editor_changed(Some(&editor)),
            RootDecision::Resolve(DocumentId::new("notes.txt"))
        );
        assert_eq!(on_editor_changed(None), RootDecision::Skip(Gate::NoDocument));
    }
}
