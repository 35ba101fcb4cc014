//! # Deprecated option warner.
//!
//! Remembers which deprecated keys have been warned about in this process
//! ([`DeprecationWarner::warned`] only grows). A key is marked as warned the moment
//! it is handed out, before the user has seen or answered the warning, so the same
//! key is never warned twice no matter how many documents are opened.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::config::ConfigGate;
use crate::config::keys::{DEPRECATED, Deprecation};

/// One-shot-per-key deprecation check.
pub struct DeprecationWarner {
    table: &'static [Deprecation],
    warned: Mutex<HashSet<&'static str>>,
}

impl DeprecationWarner {
    /// Creates a warner over the built-in table of renamed keys.
    pub fn new() -> Self {
        Self::with_table(DEPRECATED)
    }

    /// Creates a warner over a custom table.
    pub fn with_table(table: &'static [Deprecation]) -> Self {
        Self {
            table,
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// Returns the entries whose old key is set and has not been warned about yet,
    /// marking them as warned.
    pub fn take_due(&self, config: &ConfigGate) -> Vec<&'static Deprecation> {
        let mut warned = self.warned.lock().unwrap_or_else(PoisonError::into_inner);
        self.table
            .iter()
            .filter(|d| config.is_set(d.old_key))
            .filter(|d| warned.insert(d.old_key))
            .collect()
    }

    /// Keys warned about so far.
    pub fn warned(&self) -> Vec<&'static str> {
        let warned = self.warned.lock().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<_> = warned.iter().copied().collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for DeprecationWarner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::MemoryConfig;
    use crate::core::CoordinatorConfig;

    #[test]
    fn warns_once_per_key() {
        let src = Arc::new(MemoryConfig::new());
        let gate = ConfigGate::new(src.clone(), &CoordinatorConfig::default());
        let warner = DeprecationWarner::new();

        assert!(warner.take_due(&gate).is_empty());

        src.set("linter_command_active_file", "chktex -wall");
        let due = warner.take_due(&gate);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].new_key, "linter_args_active");

        for _ in 0..10 {
            assert!(warner.take_due(&gate).is_empty());
        }

        src.set("linter_command_root_file", "chktex");
        let due = warner.take_due(&gate);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].old_key, "linter_command_root_file");
        assert_eq!(
            warner.warned(),
            vec!["linter_command_active_file", "linter_command_root_file"]
        );
    }

    #[test]
    fn warned_set_survives_unset() {
        let src = Arc::new(MemoryConfig::new());
        let gate = ConfigGate::new(src.clone(), &CoordinatorConfig::default());
        let warner = DeprecationWarner::new();

        src.set("linter_command_active_file", "x");
        assert_eq!(warner.take_due(&gate).len(), 1);
        src.unset("linter_command_active_file");
        src.set("linter_command_active_file", "y");
        assert!(warner.take_due(&gate).is_empty());
    }
}
