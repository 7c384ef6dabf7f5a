//! # Three-phase stepper contract.
//!
//! A [`Stepper`] is the caller-supplied procedure a
//! [`Periodic`](crate::Periodic) runner drives:
//!
//! ```text
//! setup()     — once, before any iteration
//! step()      — once per iteration, until exit is requested
//! teardown()  — exactly once, after iteration stops, regardless of why
//! ```
//!
//! `step` receives the controlling task's [`ExitGate`]; calling
//! [`ExitGate::done`] from inside `step` is the mechanism for finite,
//! self-terminating periodic work (stop after N iterations, stop once a
//! queue drains, and so on). That is distinct from an operator-driven
//! [`Task::shutdown`](crate::Task::shutdown) — both end the loop the same
//! way, through the gate.

use async_trait::async_trait;

use crate::error::StepError;
use crate::tasks::ExitGate;

/// Caller-supplied three-phase procedure driven by a
/// [`Periodic`](crate::Periodic) runner.
///
/// All three phases run on the task's execution, one at a time; `&mut self`
/// gives each phase exclusive access to the stepper's state without locks.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use taskcell::{ExitGate, StepError, Stepper};
///
/// /// Polls a queue until told to stop, reporting how much it drained.
/// struct Drain {
///     queue: Vec<u32>,
///     drained: u64,
/// }
///
/// #[async_trait]
/// impl Stepper for Drain {
///     type Payload = u64;
///
///     async fn setup(&mut self) -> Result<(), StepError> {
///         self.drained = 0;
///         Ok(())
///     }
///
///     async fn step(&mut self, gate: &ExitGate) -> Result<(), StepError> {
///         match self.queue.pop() {
///             Some(_) => self.drained += 1,
///             None => gate.done(), // nothing left: stop the loop
///         }
///         Ok(())
///     }
///
///     async fn teardown(&mut self) -> Result<u64, StepError> {
///         Ok(self.drained)
///     }
/// }
/// ```
#[async_trait]
pub trait Stepper: Send + 'static {
    /// Value produced by [`teardown`](Stepper::teardown), delivered in the
    /// [`Report`](crate::Report).
    type Payload: Send + 'static;

    /// Returns a stable, human-readable name for the derived task.
    fn name(&self) -> &str {
        "periodic"
    }

    /// Runs once before any iteration. An error here skips all iteration;
    /// teardown still runs.
    async fn setup(&mut self) -> Result<(), StepError>;

    /// Runs once per iteration. Under the exit-on-error policy an error
    /// terminates the loop and is recorded; otherwise it is discarded and
    /// iteration continues.
    async fn step(&mut self, gate: &ExitGate) -> Result<(), StepError>;

    /// Runs exactly once after iteration stops, whatever stopped it.
    async fn teardown(&mut self) -> Result<Self::Payload, StepError>;
}
