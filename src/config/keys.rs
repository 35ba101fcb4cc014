//! Recognized option keys.

/// Gates all lint dispatch (bool).
pub const LINTER: &str = "linter";

/// Debounce interval for edit-triggered lint, in milliseconds (integer).
pub const LINTER_INTERVAL: &str = "linter_interval";

/// Gates save-triggered build dispatch (bool).
pub const BUILD_AFTER_SAVE: &str = "build_after_save";

/// A renamed option that still has an effect on the user's setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deprecation {
    /// Key the user may still have set.
    pub old_key: &'static str,
    /// Key that replaced it.
    pub new_key: &'static str,
    /// Extra guidance appended to the warning.
    pub message: &'static str,
}

impl Deprecation {
    /// Full warning text naming both keys.
    pub fn warning(&self) -> String {
        format!(
            "\"{}\" is deprecated; use \"{}\" instead. {}",
            self.old_key, self.new_key, self.message
        )
    }
}

/// Renamed keys checked once per process lifetime.
pub const DEPRECATED: &[Deprecation] = &[
    Deprecation {
        old_key: "linter_command_active_file",
        new_key: "linter_args_active",
        message: "Only the linter arguments are configurable now.",
    },
    Deprecation {
        old_key: "linter_command_root_file",
        new_key: "linter_args_root",
        message: "Only the linter arguments are configurable now.",
    },
];

/// Label of the single follow-up action offered with a deprecation warning.
pub const OPEN_SETTINGS_ACTION: &str = "Open Settings Editor";
