//! # Work abstraction and function-backed implementation.
//!
//! This module defines the [`Work`] trait (async, cancelable, runs at most
//! once) and a convenient function-backed implementation [`WorkFn`].
//!
//! Work receives an [`ExitGate`] and should periodically check it to stop
//! cooperatively during shutdown: poll [`ExitGate::keep_running`] as a loop
//! condition, or `select!` against [`ExitGate::exited`] while blocked.
//!
//! `run` consumes the work (`self: Box<Self>`): a [`Task`](crate::Task)
//! executes its work at most once, and the signature encodes that instead of
//! leaving it to convention.

use std::borrow::Cow;
use std::future::Future;

use async_trait::async_trait;

use crate::tasks::gate::ExitGate;

/// # Asynchronous, cancelable unit of work.
///
/// A `Work` has a stable [`name`](Work::name) and an async
/// [`run`](Work::run) method that receives the task's [`ExitGate`].
/// Implementors should regularly check the gate and return promptly once
/// exit is requested; whatever `run` returns becomes the task's payload.
///
/// An infinite unit of work is a loop over
/// [`keep_running`](ExitGate::keep_running); a finite one additionally
/// checks its own progress and calls [`done`](ExitGate::done) when there is
/// nothing left to do.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use taskcell::{ExitGate, Work};
///
/// struct Countdown(u32);
///
/// #[async_trait]
/// impl Work for Countdown {
///     type Output = u32;
///
///     fn name(&self) -> &str {
///         "countdown"
///     }
///
///     async fn run(self: Box<Self>, gate: ExitGate) -> u32 {
///         let mut left = self.0;
///         while gate.keep_running() && left > 0 {
///             left -= 1;
///             tokio::task::yield_now().await;
///         }
///         left
///     }
/// }
/// ```
#[async_trait]
pub trait Work: Send + 'static {
    /// Payload type delivered through the task when the work returns.
    type Output: Send + 'static;

    /// Returns a stable, human-readable name.
    fn name(&self) -> &str;

    /// Executes the work until completion or cooperative exit.
    ///
    /// Implementations should check `gate.keep_running()` (or wait on
    /// `gate.exited()`) and return quickly to honor graceful shutdown.
    async fn run(self: Box<Self>, gate: ExitGate) -> Self::Output;
}

/// # Function-backed work implementation.
///
/// [`WorkFn`] wraps a closure `F: FnOnce(ExitGate) -> Fut`. Because work
/// runs at most once, the closure is `FnOnce` and moves its captures into
/// the future - no mutex around the closure is needed.
///
/// # Example
/// ```
/// use taskcell::{ExitGate, Work, WorkFn};
///
/// let work = WorkFn::new("drain", |gate: ExitGate| async move {
///     let mut drained = 0u64;
///     while gate.keep_running() && drained < 128 {
///         drained += 1;
///     }
///     drained
/// });
/// assert_eq!(work.name(), "drain");
/// ```
#[derive(Debug)]
pub struct WorkFn<F> {
    /// Stable name.
    name: Cow<'static, str>,
    /// Underlying function, consumed by the single run.
    func: F,
}

impl<F> WorkFn<F> {
    /// Creates a new function-backed unit of work.
    pub fn new(name: impl Into<Cow<'static, str>>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F, Fut, T> Work for WorkFn<F>
where
    F: FnOnce(ExitGate) -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(self: Box<Self>, gate: ExitGate) -> T {
        (self.func)(gate).await
    }
}
