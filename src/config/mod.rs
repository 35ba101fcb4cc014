//! Host configuration: sources, recognized keys and the gate that reads them.
//!
//! ## Contents
//! - [`ConfigSource`] read-only, always-fresh key/value store provided by the host
//! - [`ConfigValue`] loosely typed option value
//! - [`MemoryConfig`] in-memory source with live `set`/`unset`
//! - [`ConfigGate`] typed accessor applying documented defaults
//! - [`keys`] option names and the deprecated-key table
//!
//! ## Rules
//! - Options are **never cached**: every decision re-reads what it needs.
//! - Missing or mistyped options fall back to defaults; reading is infallible.

mod gate;
pub mod keys;
mod source;

pub use gate::ConfigGate;
pub use source::{ConfigSource, ConfigValue, MemoryConfig};
