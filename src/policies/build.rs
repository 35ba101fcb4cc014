//! # Build-on-save policy.
//!
//! ```text
//! classifier(doc) == false         → Skip(Unmanaged)
//! build_after_save == false        → Skip(BuildAfterSaveDisabled)
//! builder.is_build_suppressed()    → Skip(BuildSuppressed)
//! otherwise                        → Build(doc)
//! ```
//!
//! The suppression flag belongs to the builder: it raises the flag around saves it
//! performs itself. This policy reads it once, at decision time, and never writes it.

use crate::collaborators::{Builder, Classifier};
use crate::config::ConfigGate;
use crate::document::DocumentId;
use crate::events::Gate;

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDecision {
    Skip(Gate),
    Build(DocumentId),
}

/// Evaluates the build rules for a save of `document`.
pub fn decide(
    document: &DocumentId,
    classifier: &dyn Classifier,
    config: &ConfigGate,
    builder: &dyn Builder,
) -> BuildDecision {
    if document.is_empty() {
        return BuildDecision::Skip(Gate::NoDocument);
    }
    if !classifier.is_managed(document.as_path()) {
        return BuildDecision::Skip(Gate::Unmanaged);
    }
    if !config.build_after_save() {
        return BuildDecision::Skip(Gate::BuildAfterSaveDisabled);
    }
    if builder.is_build_suppressed() {
        return BuildDecision::Skip(Gate::BuildSuppressed);
    }
    BuildDecision::Build(document.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::collaborators::ExtensionClassifier;
    use crate::config::{MemoryConfig, keys};
    use crate::core::CoordinatorConfig;
    use crate::error::CollaboratorError;

    struct FlagBuilder(AtomicBool);

    #[async_trait]
    impl Builder for FlagBuilder {
        async fn build(&self, _document: DocumentId) -> Result<(), CollaboratorError> {
            Ok(())
        }
        fn is_build_suppressed(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn gates_apply_in_order() {
        let src = Arc::new(MemoryConfig::new());
        let gate = ConfigGate::new(src.clone(), &CoordinatorConfig::default());
        let cls = ExtensionClassifier::default();
        let builder = FlagBuilder(AtomicBool::new(false));
        let doc = DocumentId::new("main.tex");

        assert_eq!(
            decide(&DocumentId::new("a.txt"), &cls, &gate, &builder),
            BuildDecision::Skip(Gate::Unmanaged)
        );
        assert_eq!(decide(&doc, &cls, &gate, &builder), BuildDecision::Build(doc.clone()));

        builder.0.store(true, Ordering::SeqCst);
        assert_eq!(
            decide(&doc, &cls, &gate, &builder),
            BuildDecision::Skip(Gate::BuildSuppressed)
        );

        src.set(keys::BUILD_AFTER_SAVE, false);
        assert_eq!(
            decide(&doc, &cls, &gate, &builder),
            BuildDecision::Skip(Gate::BuildAfterSaveDisabled)
        );
    }
}
