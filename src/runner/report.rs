//! # Per-phase outcome record for a periodic run.
//!
//! One [`Report`] is assembled per run and delivered exactly once as the
//! payload of the wrapping [`Task`](crate::Task).

use crate::error::StepError;

/// Outcome of one full periodic run.
///
/// Populated progressively as phases complete:
/// - `payload` holds teardown's value when teardown succeeded;
/// - `setup` / `step` / `teardown` hold the error of the phase that failed,
///   if any.
///
/// The `step` slot is only ever populated when the runner was built with
/// `exit_on_error = true`; otherwise step errors are discarded per
/// iteration by design (fire-and-forget iterations), not by omission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<T> {
    /// Teardown's payload; `None` when teardown itself failed.
    pub payload: Option<T>,
    /// Setup's error. When set, no iteration ran.
    pub setup: Option<StepError>,
    /// The step error that terminated the loop under exit-on-error.
    pub step: Option<StepError>,
    /// Teardown's error.
    pub teardown: Option<StepError>,
}

impl<T> Report<T> {
    /// Returns `true` when no phase reported an error.
    pub fn is_clean(&self) -> bool {
        self.setup.is_none() && self.step.is_none() && self.teardown.is_none()
    }
}

impl<T> Default for Report<T> {
    fn default() -> Self {
        Self {
            payload: None,
            setup: None,
            step: None,
            teardown: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean_and_empty() {
        let report: Report<u32> = Report::default();
        assert!(report.is_clean());
        assert!(report.payload.is_none());
    }

    #[test]
    fn test_any_phase_error_marks_dirty() {
        let mut report: Report<u32> = Report::default();
        report.step = Some(StepError::new("boom"));
        assert!(!report.is_clean());
    }
}
