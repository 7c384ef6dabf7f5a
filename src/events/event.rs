//! # Lifecycle event type.
//!
//! An [`Event`] is a timestamped record of a task lifecycle transition,
//! handed to the optional [`Observe`](crate::Observe) hook. Events carry
//! the task name and nothing else; they exist for logging and metrics,
//! not for control flow.
//!
//! ## Kinds
//! ```text
//! Started       — start() accepted; the work was spawned
//! ExitRequested — done()/shutdown() raised the exit gate (first call only;
//!                 a raise through a bare ExitGate clone is not reported)
//! Finished      — the work returned and its payload is available
//! ```

use std::time::SystemTime;

/// Kind of lifecycle transition an [`Event`] records.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// `start()` accepted and the work was spawned.
    Started,
    /// `done()` or `shutdown()` raised the exit gate, first call only.
    ExitRequested,
    /// The work returned; the payload is written and the completion
    /// gate is open.
    Finished,
}

impl EventKind {
    /// Returns a short stable label (kebab-case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::ExitRequested => "exit-requested",
            EventKind::Finished => "finished",
        }
    }
}

/// A timestamped lifecycle event.
#[derive(Clone, Debug)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Name of the task this event belongs to.
    pub task: Option<String>,
    /// Wall-clock time the event was created.
    pub at: SystemTime,
}

impl Event {
    /// Creates an event timestamped with the current wall-clock time.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            task: None,
            at: SystemTime::now(),
        }
    }

    /// Attaches a task name.
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }
}
