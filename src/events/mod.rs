//! Lifecycle events emitted by a task for observability.

mod event;

pub use event::{Event, EventKind};
