//! Periodic execution of a three-phase stepper, built on [`Task`](crate::Task).
//!
//! This module provides:
//! - [`Stepper`] - the caller-supplied setup/step/teardown contract
//! - [`Periodic`] - the loop adapter that drives a stepper until exit
//! - [`Report`] - the per-phase outcome record delivered as the payload

mod periodic;
mod report;
mod stepper;

pub use periodic::Periodic;
pub use report::Report;
pub use stepper::Stepper;
