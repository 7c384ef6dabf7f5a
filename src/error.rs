//! Error types used by the task control API and by stepper phases.
//!
//! This module defines two error types, one per plane:
//!
//! - [`TaskError`] — errors raised by the task control API itself
//!   (misuse of the lifecycle, or an aborted shutdown wait).
//! - [`StepError`] — domain errors reported by a stepper phase; these are
//!   never surfaced through the control API, only captured into a
//!   [`Report`](crate::Report).
//!
//! `TaskError` provides helper methods (`as_label`, `as_message`) for
//! logging/metrics and [`TaskError::is_misuse`] to distinguish caller bugs
//! from cancellation.

use thiserror::Error;

/// # Errors produced by the task control API.
///
/// These represent misuse of the lifecycle protocol or an aborted wait.
/// None of them mean "the work failed": the control primitive has no notion
/// of a failed task, only of a completed one. Whatever the work wants to
/// report travels inside its payload.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// `shutdown` was called on a task that was never started.
    #[error("not started")]
    NotStarted,

    /// `start` was called a second time; the first start is unaffected.
    #[error("duplicate call to start")]
    AlreadyStarted,

    /// `start` was called after exit had already been requested.
    #[error("previously shutdown")]
    WasShutdown,

    /// `payload` was called a second time; the payload was already claimed.
    #[error("duplicate call to payload")]
    PayloadClaimed,

    /// The shutdown wait was aborted by the caller's context before the
    /// work completed. The work itself keeps running.
    #[error("shutdown wait canceled")]
    Canceled,

    /// The background work dropped without reporting a payload
    /// (it panicked, or its runtime shut down).
    #[error("work abandoned without a payload")]
    Abandoned,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskcell::TaskError;
    ///
    /// assert_eq!(TaskError::NotStarted.as_label(), "task_not_started");
    /// assert_eq!(TaskError::Canceled.as_label(), "task_shutdown_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::NotStarted => "task_not_started",
            TaskError::AlreadyStarted => "task_already_started",
            TaskError::WasShutdown => "task_was_shutdown",
            TaskError::PayloadClaimed => "task_payload_claimed",
            TaskError::Canceled => "task_shutdown_canceled",
            TaskError::Abandoned => "task_abandoned",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }

    /// Indicates whether the error is a caller protocol violation
    /// (as opposed to an aborted wait or abandoned work).
    ///
    /// # Example
    /// ```
    /// use taskcell::TaskError;
    ///
    /// assert!(TaskError::AlreadyStarted.is_misuse());
    /// assert!(!TaskError::Canceled.is_misuse());
    /// ```
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            TaskError::NotStarted
                | TaskError::AlreadyStarted
                | TaskError::WasShutdown
                | TaskError::PayloadClaimed
        )
    }
}

/// # Domain error reported by a stepper phase.
///
/// Opaque message wrapper. The runner never interprets it; it is recorded
/// into the [`Report`](crate::Report) slot for the phase that produced it
/// and handed to the consumer, who decides its meaning.
///
/// # Example
/// ```
/// use taskcell::StepError;
///
/// let err = StepError::new("connection refused");
/// assert_eq!(err.to_string(), "connection refused");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StepError {
    message: String,
}

impl StepError {
    /// Creates a step error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for StepError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for StepError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let errs = [
            TaskError::NotStarted,
            TaskError::AlreadyStarted,
            TaskError::WasShutdown,
            TaskError::PayloadClaimed,
            TaskError::Canceled,
            TaskError::Abandoned,
        ];
        for e in errs {
            assert!(e.as_label().starts_with("task_"));
            assert!(!e.as_message().is_empty());
        }
    }

    #[test]
    fn test_misuse_classification() {
        assert!(TaskError::NotStarted.is_misuse());
        assert!(TaskError::WasShutdown.is_misuse());
        assert!(TaskError::PayloadClaimed.is_misuse());
        assert!(!TaskError::Abandoned.is_misuse());
        assert!(!TaskError::Canceled.is_misuse());
    }

    #[test]
    fn test_step_error_from_str() {
        let err: StepError = "boom".into();
        assert_eq!(err.message(), "boom");
        assert_eq!(err, StepError::new("boom"));
    }
}
