//! Task abstractions: the lifecycle wrapper, its exit gate, and the unit
//! of work it runs.
//!
//! This module provides the core task-related types:
//! - [`Task`] - lifecycle wrapper around a single unit of work
//! - [`ExitGate`] - cloneable cooperative exit signal
//! - [`Work`] - trait for implementing a cancelable unit of work
//! - [`WorkFn`] - function-backed work implementation

mod gate;
mod task;
mod work;

pub use gate::ExitGate;
pub use task::Task;
pub use work::{Work, WorkFn};
