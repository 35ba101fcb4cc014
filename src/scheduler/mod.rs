//! Deferred work.
//!
//! - [`DebounceScheduler`] single-slot trailing-edge debounce used for edit-triggered lint
//! - [`Scheduled`] what a `schedule` call did

mod debounce;

pub use debounce::{DebounceScheduler, Scheduled};
