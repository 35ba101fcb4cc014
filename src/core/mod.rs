//! Coordinator core: decision making, dispatch and lifecycle.
//!
//! The public API from this module is [`Coordinator`] (with its
//! [`CoordinatorHandle`]), [`CoordinatorBuilder`] and [`CoordinatorConfig`].
//!
//! Internal modules:
//! - [`coordinator`]: fans each lifecycle event out to the policies and executes decisions;
//! - [`builder`]: assembles the coordinator, bus and subscriber workers;
//! - [`dispatch`]: fire-and-forget collaborator calls with failure reporting;
//! - [`config`]: construction-time settings and option defaults.

mod builder;
mod config;
mod coordinator;
mod dispatch;

pub use builder::CoordinatorBuilder;
pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CoordinatorHandle};

pub(crate) use dispatch::panic_message;

use crate::collaborators::Collaborators;

impl Coordinator {
    /// Starts building a coordinator over `collaborators`.
    pub fn builder(collaborators: Collaborators, cfg: CoordinatorConfig) -> CoordinatorBuilder {
        CoordinatorBuilder::new(collaborators, cfg)
    }
}
