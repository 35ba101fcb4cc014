//! # Configuration sources.
//!
//! A [`ConfigSource`] is owned by the host and may change at any time (the user
//! edits settings). The coordinator asks it again on every event.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Loosely typed option value as stored by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ConfigValue {
    /// Interprets the value as a boolean (`"true"`/`"false"` strings accepted).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Str(s) => s.trim().parse().ok(),
            ConfigValue::Int(_) => None,
        }
    }

    /// Interprets the value as an integer (numeric strings accepted).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(n) => Some(*n),
            ConfigValue::Str(s) => s.trim().parse().ok(),
            ConfigValue::Bool(_) => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Str(s)
    }
}

/// Read-only, always-fresh key/value store.
///
/// Implementations must return the **current** value; the coordinator never caches.
pub trait ConfigSource: Send + Sync + 'static {
    /// Returns the current value of `key`, or `None` if unset.
    fn get(&self, key: &str) -> Option<ConfigValue>;

    /// True if the user has set `key` to any value.
    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory source with interior mutability.
///
/// Useful for embedding hosts that push settings changes in, and for tests.
#[derive(Default, Debug)]
pub struct MemoryConfig {
    values: RwLock<HashMap<String, ConfigValue>>,
}

impl MemoryConfig {
    /// Creates an empty source (all options at their defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Removes `key`; returns the previous value.
    pub fn unset(&self, key: &str) -> Option<ConfigValue> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl ConfigSource for MemoryConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_conversions() {
        assert_eq!(ConfigValue::from("true").as_bool(), Some(true));
        assert_eq!(ConfigValue::from(" 250 ").as_int(), Some(250));
        assert_eq!(ConfigValue::from(3i64).as_bool(), None);
        assert_eq!(ConfigValue::from(false).as_int(), None);
    }

    #[test]
    fn memory_config_is_live() {
        let cfg = MemoryConfig::new();
        assert!(!cfg.is_set("linter"));
        cfg.set("linter", true);
        assert_eq!(cfg.get("linter"), Some(ConfigValue::Bool(true)));
        assert_eq!(cfg.unset("linter"), Some(ConfigValue::Bool(true)));
        assert!(cfg.get("linter").is_none());
    }
}
