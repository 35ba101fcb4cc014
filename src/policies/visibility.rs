//! # Status indicator visibility.
//!
//! Purely a function of the current focus snapshot, recomputed from scratch on every
//! focus change:
//!
//! | active editor | document path | classifier | state  |
//! |---------------|---------------|------------|--------|
//! | absent        | -             | -          | Hidden |
//! | present       | empty         | -          | Hidden |
//! | present       | non-empty     | false      | Hidden |
//! | present       | non-empty     | true       | Shown  |

use crate::collaborators::Classifier;
use crate::document::ActiveEditor;
use crate::events::Gate;

/// Indicator state. Initial state is [`VisibilityState::Hidden`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    Shown,
    #[default]
    Hidden,
}

/// Computes the state for a focus snapshot, with the gate that hid it.
pub fn evaluate(
    editor: Option<&ActiveEditor>,
    classifier: &dyn Classifier,
) -> (VisibilityState, Option<Gate>) {
    let Some(editor) = editor else {
        return (VisibilityState::Hidden, Some(Gate::NoDocument));
    };
    if editor.document.is_empty() {
        return (VisibilityState::Hidden, Some(Gate::NoDocument));
    }
    if !classifier.is_managed(editor.document.as_path()) {
        return (VisibilityState::Hidden, Some(Gate::Unmanaged));
    }
    (VisibilityState::Shown, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::ExtensionClassifier;

    #[test]
    fn transition_table() {
        let cls = ExtensionClassifier::default();
        assert_eq!(evaluate(None, &cls).0, VisibilityState::Hidden);
        assert_eq!(
            evaluate(Some(&ActiveEditor::new("")), &cls).0,
            VisibilityState::Hidden
        );
        assert_eq!(
            evaluate(Some(&ActiveEditor::new("notes.txt")), &cls),
            (VisibilityState::Hidden, Some(Gate::Unmanaged))
        );
        assert_eq!(
            evaluate(Some(&ActiveEditor::new("main.tex")), &cls),
            (VisibilityState::Shown, None)
        );
    }

    #[test]
    fn initial_state_is_hidden() {
        assert_eq!(VisibilityState::default(), VisibilityState::Hidden);
    }
}
