//! # Simple logging observer for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [started] task=worker
//! [exit-requested] task=worker
//! [finished] task=worker
//! ```

use crate::events::Event;
use crate::observe::Observe;

/// Simple stdout logging observer.
///
/// Enabled via the `logging` feature. Prints human-readable event lines
/// to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Observe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

impl Observe for LogWriter {
    fn on_event(&self, event: &Event) {
        match &event.task {
            Some(task) => println!("[{}] task={task}", event.kind.as_label()),
            None => println!("[{}]", event.kind.as_label()),
        }
    }
}
