//! Dispatch policies.
//!
//! Each policy is a pure decision over the event, the classifier and freshly read
//! options. The coordinator executes the decision; policies never call a collaborator
//! that does work.
//!
//! ## Contents
//! - [`lint`] save / focus / edit → lint root, lint active, debounce, or skip
//! - [`build`] save → build or skip
//! - [`root`] open / focus → resolve root or skip
//! - [`visibility`] focus → indicator shown or hidden
//! - [`deprecation`] one-shot warnings for renamed options
//!
//! ## Quick wiring
//! ```text
//! LifecycleEvent ──► Coordinator::handle
//!      ├─► root::on_opened / on_editor_changed ──► spawn Resolver::find_root
//!      ├─► lint::decide ──► spawn Linter::* | DebounceScheduler::schedule
//!      ├─► build::decide ──► spawn Builder::build
//!      ├─► visibility::evaluate ──► StatusIndicator::show / hide
//!      └─► DeprecationWarner::take_due ──► spawn Notifier::warn
//! ```
//!
//! Every `Skip` carries the [`Gate`](crate::Gate) that caused it.

pub mod build;
pub mod deprecation;
pub mod lint;
pub mod root;
pub mod visibility;

pub use build::BuildDecision;
pub use deprecation::DeprecationWarner;
pub use lint::{LintDecision, LintTrigger};
pub use root::RootDecision;
pub use visibility::VisibilityState;
