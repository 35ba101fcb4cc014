//! Error types used by the coordinator and its collaborators.
//!
//! This module defines three error enums:
//!
//! - [`CollaboratorError`] failures reported by a dispatched collaborator
//!   (resolver, linter, builder, notifier).
//! - [`SubmitError`] failures of [`CoordinatorHandle`](crate::CoordinatorHandle) submission.
//! - [`CoordinatorError`] failures of the coordinator run loop itself.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logs/metrics.
//!
//! Collaborator errors never escape the coordinator: they are caught in the
//! dispatching task and published as [`EventKind::CollaboratorFailed`](crate::EventKind).

use thiserror::Error;

/// # Errors produced by collaborator calls.
///
/// The coordinator treats every collaborator call as fire-and-forget. A returned
/// error (or a panic) is converted into an observability event and dropped.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator ran and failed.
    #[error("collaborator failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The collaborator could not be reached (e.g. external tool missing).
    #[error("collaborator unavailable: {error}")]
    Unavailable {
        /// The underlying error message.
        error: String,
    },

    /// The collaborator future panicked; the payload is rendered as text.
    #[error("collaborator panicked: {info}")]
    Panicked {
        /// Panic payload rendered as a string.
        info: String,
    },
}

impl CollaboratorError {
    /// Shorthand for [`CollaboratorError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        CollaboratorError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use docvisor::CollaboratorError;
    ///
    /// let err = CollaboratorError::failed("chktex exited with 2");
    /// assert_eq!(err.as_label(), "collaborator_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CollaboratorError::Failed { .. } => "collaborator_failed",
            CollaboratorError::Unavailable { .. } => "collaborator_unavailable",
            CollaboratorError::Panicked { .. } => "collaborator_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CollaboratorError::Failed { error } => format!("error: {error}"),
            CollaboratorError::Unavailable { error } => format!("unavailable: {error}"),
            CollaboratorError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// Error returned by [`CoordinatorHandle`](crate::CoordinatorHandle) submissions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Event queue is full (try again later or use async `submit`).
    #[error("event queue full")]
    Full,

    /// Coordinator run loop is gone (stopped or never started and dropped).
    #[error("coordinator channel closed")]
    Closed,
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Full => "submit_full",
            SubmitError::Closed => "submit_closed",
        }
    }
}

/// # Errors produced by the coordinator run loop.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// `run` was called while another run loop already owns the event queue.
    #[error("coordinator already running")]
    AlreadyRunning,
}

impl CoordinatorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use docvisor::CoordinatorError;
    ///
    /// assert_eq!(CoordinatorError::AlreadyRunning.as_label(), "coordinator_already_running");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CoordinatorError::AlreadyRunning => "coordinator_already_running",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            CollaboratorError::Unavailable { error: "x".into() }.as_label(),
            "collaborator_unavailable"
        );
        assert_eq!(
            CollaboratorError::Panicked { info: "x".into() }.as_label(),
            "collaborator_panicked"
        );
        assert_eq!(SubmitError::Full.as_label(), "submit_full");
        assert_eq!(SubmitError::Closed.as_label(), "submit_closed");
    }

    #[test]
    fn messages_carry_details() {
        let err = CollaboratorError::failed("exit 2");
        assert_eq!(err.as_message(), "error: exit 2");
        assert_eq!(err.to_string(), "collaborator failed: exit 2");
    }
}
