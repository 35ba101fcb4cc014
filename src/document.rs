//! # Document identities and host lifecycle events.
//!
//! [`DocumentId`] is the only identity the coordinator knows: a lexically normalized
//! file path. Two ids are equal iff their normalized paths are equal.
//!
//! [`LifecycleEvent`] is what the host delivers to the coordinator.
//!
//! ## Normalization
//! ```text
//! "proj/./chapters/../main.tex" → "proj/main.tex"
//! "../a/b.tex"                  → "../a/b.tex"   (leading `..` kept)
//! "/a/../../b.tex"              → "/b.tex"       (cannot climb above root)
//! ""                            → ""             (untitled buffer)
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Opaque handle for a document, equal to its normalized file path.
///
/// Cheap to clone (`Arc`-backed).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId {
    path: Arc<Path>,
}

impl DocumentId {
    /// Creates an id from any path, normalizing it lexically.
    ///
    /// Does not touch the filesystem (no symlink resolution).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Arc::from(normalize(path.as_ref())),
        }
    }

    /// Returns the normalized path.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// True for documents without a backing file (untitled buffers).
    pub fn is_empty(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({:?})", self.path)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId::new(s)
    }
}

impl From<PathBuf> for DocumentId {
    fn from(p: PathBuf) -> Self {
        DocumentId::new(p)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// The focused editor as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveEditor {
    /// Document shown in the editor (may be empty for untitled buffers).
    pub document: DocumentId,
}

impl ActiveEditor {
    /// Creates an editor snapshot for the given document path.
    pub fn new(document: impl Into<DocumentId>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

/// Lifecycle events consumed by the coordinator (host → coordinator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A document was opened.
    DocumentOpened(DocumentId),
    /// A document was saved to disk.
    DocumentSaved(DocumentId),
    /// A document's buffer changed.
    DocumentEdited(DocumentId),
    /// Focus moved to another editor, or away from all editors (`None`).
    ActiveEditorChanged(Option<ActiveEditor>),
}

impl LifecycleEvent {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleEvent::DocumentOpened(_) => "document_opened",
            LifecycleEvent::DocumentSaved(_) => "document_saved",
            LifecycleEvent::DocumentEdited(_) => "document_edited",
            LifecycleEvent::ActiveEditorChanged(_) => "active_editor_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_and_parent_components() {
        assert_eq!(
            DocumentId::new("proj/./chapters/../main.tex"),
            DocumentId::new("proj/main.tex")
        );
        assert_eq!(DocumentId::new("../a/b.tex").as_path(), Path::new("../a/b.tex"));
        assert_eq!(DocumentId::new("/a/../../b.tex").as_path(), Path::new("/b.tex"));
    }

    #[test]
    fn empty_path_is_empty() {
        assert!(DocumentId::new("").is_empty());
        assert!(DocumentId::new(".").is_empty());
        assert!(!DocumentId::new("main.tex").is_empty());
    }

    #[test]
    fn equality_is_by_path_only() {
        let a = DocumentId::from("x/main.tex");
        let b = DocumentId::from(PathBuf::from("x/sub/../main.tex"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "x/main.tex");
    }
}
