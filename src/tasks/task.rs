//! # Lifecycle wrapper for a single unit of work.
//!
//! [`Task`] runs one [`Work`] on the Tokio runtime, exposes start/stop
//! controls, and delivers the work's payload exactly once.
//!
//! ## Lifecycle
//! ```text
//! new() ──► start() ──► [work running] ──► work returns
//!              │              │                  │
//!              │         done()/shutdown()       ├─► payload sent (one-shot)
//!              │              │                  └─► completion gate opens
//!              │              ▼
//!              │        exit gate raised (broadcast, idempotent)
//!              │              │
//!              │              └──► work observes it and returns
//!              ▼
//!         payload() ──► awaits the one-shot value (claimable once)
//! ```
//!
//! ## Rules
//! - `start` succeeds **at most once**; a second call fails with
//!   [`TaskError::AlreadyStarted`] and leaves the first run untouched.
//! - `done` is **always idempotent**: raising the exit gate twice is a
//!   no-op, never an error.
//! - `shutdown` is idempotent too: a second call passes the started check,
//!   re-raises the (already raised) gate, and waits again.
//! - The payload is sent **before** the completion gate opens, so a waiter
//!   released by `shutdown` reads a fully written payload.
//! - `shutdown` never declares the work finished. Only the work does that,
//!   by returning; aborting the shutdown wait leaves the work running.
//! - The work must **never** call `shutdown` on its own task (that wait can
//!   only end when the work returns). In-work self-termination goes through
//!   [`ExitGate::done`].
//!
//! All control methods may be called concurrently from any number of tasks
//! or threads. Flag transitions are serialized by an internal mutex that is
//! never held across an await; both gates are broadcast tokens, so any
//! number of observers may wait on them simultaneously.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::events::{Event, EventKind};
use crate::observe::Observe;
use crate::tasks::gate::ExitGate;
use crate::tasks::work::Work;

/// State guarded by the task mutex.
///
/// `runnable` is present until `start` consumes it, so "already started"
/// is encoded structurally rather than as a separate flag. `receiver` is
/// present until `payload` claims it.
struct Inner<T> {
    runnable: Option<(Box<dyn Work<Output = T>>, oneshot::Sender<T>)>,
    receiver: Option<oneshot::Receiver<T>>,
    exit_event_sent: bool,
}

/// # Lifecycle wrapper around a single unit of work.
///
/// One instance per unit of work; not reusable after its single start.
/// See the [module docs](self) for the lifecycle rules.
///
/// # Example
/// ```
/// use taskcell::{ExitGate, Task, WorkFn};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), taskcell::TaskError> {
///     let task = Task::new(WorkFn::new("ticks", |gate: ExitGate| async move {
///         let mut ticks = 0u64;
///         while gate.keep_running() {
///             ticks += 1;
///             tokio::task::yield_now().await;
///         }
///         ticks
///     }));
///
///     task.start()?;
///     task.done(); // request cooperative exit
///
///     let ticks = task.payload().await?;
///     assert!(ticks < u64::MAX);
///     Ok(())
/// }
/// ```
pub struct Task<T> {
    name: String,
    inner: Mutex<Inner<T>>,
    gate: ExitGate,
    finished: CancellationToken,
    observer: Option<Arc<dyn Observe>>,
}

impl<T: Send + 'static> Task<T> {
    /// Creates a task around `work`. The work does not run until
    /// [`start`](Task::start).
    pub fn new<W>(work: W) -> Self
    where
        W: Work<Output = T>,
    {
        Self::build(work, None)
    }

    /// Creates a task that publishes lifecycle events to `observer`.
    pub fn with_observer<W>(work: W, observer: Arc<dyn Observe>) -> Self
    where
        W: Work<Output = T>,
    {
        Self::build(work, Some(observer))
    }

    fn build<W>(work: W, observer: Option<Arc<dyn Observe>>) -> Self
    where
        W: Work<Output = T>,
    {
        let (sender, receiver) = oneshot::channel();
        Self {
            name: work.name().to_string(),
            inner: Mutex::new(Inner {
                runnable: Some((Box::new(work), sender)),
                receiver: Some(receiver),
                exit_event_sent: false,
            }),
            gate: ExitGate::new(),
            finished: CancellationToken::new(),
            observer,
        }
    }

    /// Returns the task name (taken from the work at construction).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawns the work on the Tokio runtime. May only succeed once.
    ///
    /// Fails with [`TaskError::WasShutdown`] if exit was requested before
    /// the task ever started, and with [`TaskError::AlreadyStarted`] on any
    /// call after the first; neither failure has side effects.
    ///
    /// When the work returns, its payload is sent into the one-shot slot
    /// and then the completion gate opens, in that order.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime (this is `tokio::spawn`).
    pub fn start(&self) -> Result<(), TaskError> {
        let (work, sender) = {
            let mut inner = self.lock();
            if self.gate.is_exit_requested() {
                return Err(TaskError::WasShutdown);
            }
            inner.runnable.take().ok_or(TaskError::AlreadyStarted)?
        };

        let gate = self.gate.clone();
        let finished = self.finished.clone();
        let observer = self.observer.clone();
        let name = self.name.clone();

        // published before the spawn so Started always precedes Finished
        self.publish(EventKind::Started);

        tokio::spawn(async move {
            let payload = work.run(gate).await;
            // The send must land before the completion gate opens: anyone
            // released by shutdown() is then guaranteed a written payload.
            let _ = sender.send(payload);
            finished.cancel();
            if let Some(obs) = &observer {
                obs.on_event(&Event::now(EventKind::Finished).with_task(name));
            }
        });

        Ok(())
    }

    /// Idempotently raises the exit gate. Never blocks, never fails.
    ///
    /// Safe to call any number of times, concurrently with `shutdown`, and
    /// before `start` (in which case `start` will refuse to run). Intended
    /// for the running work itself, or a cooperating component, to request
    /// graceful exit; it does not wait for completion.
    pub fn done(&self) {
        let first = {
            // raised under the mutex so start()'s was-shutdown check is
            // exact against a racing done()
            let mut inner = self.lock();
            let first = !std::mem::replace(&mut inner.exit_event_sent, true);
            self.gate.done();
            first
        };
        if first {
            self.publish(EventKind::ExitRequested);
        }
    }

    /// Requests exit and waits for the work to finish.
    ///
    /// Fails with [`TaskError::NotStarted`] if [`start`](Task::start) was
    /// never called. Otherwise raises the exit gate and waits until the
    /// work returns (`Ok`) or `ctx` is cancelled first
    /// ([`TaskError::Canceled`]). When both are ready the completed work
    /// wins. Aborting the wait does not abort the work; it keeps running
    /// until it observes the gate.
    pub async fn shutdown(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        {
            let inner = self.lock();
            if inner.runnable.is_some() {
                return Err(TaskError::NotStarted);
            }
        }
        self.done();

        tokio::select! {
            biased;
            _ = self.finished.cancelled() => Ok(()),
            _ = ctx.cancelled() => Err(TaskError::Canceled),
        }
    }

    /// Returns `true` until exit has been requested, `false` forever after.
    ///
    /// Lock-free; this is the condition the running work polls.
    pub fn keep_running(&self) -> bool {
        self.gate.keep_running()
    }

    /// Returns a clone of the exit gate.
    ///
    /// Useful for waiting on [`ExitGate::exited`] instead of polling, and
    /// for requesting exit from outside without holding the whole task.
    pub fn exit_gate(&self) -> ExitGate {
        self.gate.clone()
    }

    /// Waits for the work to finish and yields its payload.
    ///
    /// Only one call ever succeeds; the rest fail with
    /// [`TaskError::PayloadClaimed`] without disturbing the first claim.
    /// If the work is dropped without reporting (it panicked, or its
    /// runtime shut down), fails with [`TaskError::Abandoned`].
    ///
    /// Note that this waits for the work to *return*; on a task that was
    /// never started it waits until someone starts it.
    pub async fn payload(&self) -> Result<T, TaskError> {
        let receiver = {
            let mut inner = self.lock();
            inner.receiver.take().ok_or(TaskError::PayloadClaimed)?
        };
        receiver.await.map_err(|_| TaskError::Abandoned)
    }

    /// Critical sections only move `Option`s and flip a flag; a poisoning
    /// panic cannot leave partial state, so the guard is recovered.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, kind: EventKind) {
        if let Some(obs) = &self.observer {
            obs.on_event(&Event::now(kind).with_task(self.name.clone()));
        }
    }
}
