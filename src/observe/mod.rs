//! Observation hooks for task lifecycle events.
//!
//! - [`Observe`] - trait for receiving lifecycle [`Event`](crate::Event)s
//! - [`LogWriter`] - built-in stdout observer (requires the `logging` feature)

mod observer;

pub use observer::Observe;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
