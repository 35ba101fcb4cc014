//! Extension-based [`Classifier`].

use std::path::Path;

use super::Classifier;

/// Extensions managed by default.
const DEFAULT_EXTENSIONS: &[&str] = &["tex", "rnw", "jnw", "snw", "rtex"];

/// Classifies documents by file extension (case-insensitive).
#[derive(Clone, Debug)]
pub struct ExtensionClassifier {
    extensions: Vec<String>,
}

impl ExtensionClassifier {
    /// Creates a classifier for the given extensions (without the leading dot).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl Classifier for ExtensionClassifier {
    fn is_managed(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_default_extensions_case_insensitively() {
        let c = ExtensionClassifier::default();
        assert!(c.is_managed(Path::new("main.tex")));
        assert!(c.is_managed(Path::new("dir/Chapter.TEX")));
        assert!(c.is_managed(Path::new("analysis.Rnw")));
        assert!(!c.is_managed(Path::new("notes.txt")));
        assert!(!c.is_managed(Path::new("Makefile")));
        assert!(!c.is_managed(Path::new("")));
    }

    #[test]
    fn custom_extensions_strip_leading_dot() {
        let c = ExtensionClassifier::new([".md"]);
        assert!(c.is_managed(Path::new("README.md")));
        assert!(!c.is_managed(Path::new("main.tex")));
    }
}
