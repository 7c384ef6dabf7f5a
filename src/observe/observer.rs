//! # Observation hook for lifecycle events.
//!
//! An [`Observe`] implementor is attached at construction with
//! [`Task::with_observer`](crate::Task::with_observer) and receives every
//! lifecycle [`Event`] the task publishes.
//!
//! The hook is synchronous: events are published inline from the control
//! methods (including the non-async `done()`), so `on_event` must return
//! quickly and must not block. For anything heavier, hand the event off to
//! your own channel or task inside the hook.

use crate::events::Event;

/// Receiver of task lifecycle events.
///
/// # Example
/// ```
/// use taskcell::{Event, Observe};
///
/// struct Counter(std::sync::atomic::AtomicUsize);
///
/// impl Observe for Counter {
///     fn on_event(&self, _event: &Event) {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///     }
/// }
/// ```
pub trait Observe: Send + Sync + 'static {
    /// Called for each lifecycle event, in publication order.
    ///
    /// Must not block; the task publishes inline.
    fn on_event(&self, event: &Event);
}
