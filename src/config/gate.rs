//! # Configuration gate.
//!
//! [`ConfigGate`] is a thin typed accessor over a [`ConfigSource`]. It holds no state
//! besides the documented defaults: every call goes back to the source.
//!
//! ## Fallbacks
//! ```text
//! linter            unset / not a bool        → CoordinatorConfig::linter
//! linter_interval   unset / not an int / ≤ 0  → CoordinatorConfig::linter_interval
//! build_after_save  unset / not a bool        → CoordinatorConfig::build_after_save
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::core::CoordinatorConfig;

use super::keys;
use super::source::ConfigSource;

/// Typed, always-fresh view of the recognized options.
#[derive(Clone)]
pub struct ConfigGate {
    source: Arc<dyn ConfigSource>,
    linter: bool,
    linter_interval: Duration,
    build_after_save: bool,
}

impl ConfigGate {
    /// Creates a gate over `source` with defaults taken from `cfg`.
    pub fn new(source: Arc<dyn ConfigSource>, cfg: &CoordinatorConfig) -> Self {
        Self {
            source,
            linter: cfg.linter,
            linter_interval: cfg.linter_interval_clamped(),
            build_after_save: cfg.build_after_save,
        }
    }

    /// Current value of `linter`.
    pub fn linter_enabled(&self) -> bool {
        self.bool_or(keys::LINTER, self.linter)
    }

    /// Current value of `linter_interval`.
    pub fn linter_interval(&self) -> Duration {
        self.source
            .get(keys::LINTER_INTERVAL)
            .and_then(|v| v.as_int())
            .filter(|ms| *ms > 0)
            .map(|ms| Duration::from_millis(ms as u64))
            .unwrap_or(self.linter_interval)
    }

    /// Current value of `build_after_save`.
    pub fn build_after_save(&self) -> bool {
        self.bool_or(keys::BUILD_AFTER_SAVE, self.build_after_save)
    }

    /// True if the user still sets `key` (used for deprecated keys).
    pub fn is_set(&self, key: &str) -> bool {
        self.source.is_set(key)
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        self.source
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfig;

    fn gate() -> (Arc<MemoryConfig>, ConfigGate) {
        let src = Arc::new(MemoryConfig::new());
        let gate = ConfigGate::new(src.clone(), &CoordinatorConfig::default());
        (src, gate)
    }

    #[test]
    fn defaults_when_unset() {
        let (_, gate) = gate();
        assert!(!gate.linter_enabled());
        assert!(gate.build_after_save());
        assert_eq!(gate.linter_interval(), Duration::from_millis(300));
    }

    #[test]
    fn reads_fresh_values_every_time() {
        let (src, gate) = gate();
        src.set(keys::LINTER, true);
        assert!(gate.linter_enabled());
        src.set(keys::LINTER, false);
        assert!(!gate.linter_enabled());
        src.set(keys::LINTER_INTERVAL, 750i64);
        assert_eq!(gate.linter_interval(), Duration::from_millis(750));
    }

    #[test]
    fn mistyped_or_nonpositive_values_fall_back() {
        let (src, gate) = gate();
        src.set(keys::LINTER_INTERVAL, 0i64);
        assert_eq!(gate.linter_interval(), Duration::from_millis(300));
        src.set(keys::LINTER_INTERVAL, -5i64);
        assert_eq!(gate.linter_interval(), Duration::from_millis(300));
        src.set(keys::BUILD_AFTER_SAVE, "maybe");
        assert!(gate.build_after_save());
    }
}
