//! # Coordinator runtime configuration.
//!
//! Provides [`CoordinatorConfig`], the settings fixed at construction time.
//!
//! Config is used in two ways:
//! 1. **Coordinator creation**: `Coordinator::builder(collaborators, config)`
//! 2. **Option defaults**: [`ConfigGate`](crate::ConfigGate) falls back to these values
//!    when the host leaves an option unset or sets it to something unusable.
//!
//! ## Sentinel values
//! - `linter_interval = 0s` → clamped to 1ms by [`CoordinatorConfig::linter_interval_clamped`]

use std::time::Duration;

/// Construction-time configuration of the coordinator.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `queue_capacity`: Lifecycle event queue used by `run` (min 1)
/// - `linter`: Default for the `linter` option
/// - `linter_interval`: Default for the `linter_interval` option
/// - `build_after_save`: Default for the `build_after_save` option
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages will
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Capacity of the lifecycle event queue fed by [`CoordinatorHandle`](crate::CoordinatorHandle).
    ///
    /// When full, `submit()` waits and `try_submit()` returns `SubmitError::Full`.
    pub queue_capacity: usize,

    /// Whether linting is enabled when the host leaves `linter` unset.
    pub linter: bool,

    /// Debounce interval used when the host leaves `linter_interval` unset.
    pub linter_interval: Duration,

    /// Whether saving builds when the host leaves `build_after_save` unset.
    pub build_after_save: bool,
}

impl CoordinatorConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a queue capacity clamped to a minimum of 1 (tokio mpsc panics on 0).
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }

    /// Returns the default interval clamped to at least 1ms.
    #[inline]
    pub fn linter_interval_clamped(&self) -> Duration {
        self.linter_interval.max(Duration::from_millis(1))
    }
}

impl Default for CoordinatorConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `queue_capacity = 256`
    /// - `linter = false` (linting is opt-in)
    /// - `linter_interval = 300ms`
    /// - `build_after_save = true`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            queue_capacity: 256,
            linter: false,
            linter_interval: Duration::from_millis(300),
            build_after_save: true,
        }
    }
}
