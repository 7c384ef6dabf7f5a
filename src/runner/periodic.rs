//! # Periodic runner: drive a stepper until told to stop.
//!
//! [`Periodic`] adapts a [`Stepper`] into a unit of [`Work`] whose payload
//! is a [`Report`], then wraps it in a [`Task`] via
//! [`into_task`](Periodic::into_task).
//!
//! ## Flow
//! ```text
//! setup()
//!   ├─ Err ──► record in report, skip all iteration
//!   └─ Ok ───► loop while the exit gate is up (checked at the top, so the
//!              first iteration is never delayed):
//!                ├─► step()
//!                │     └─ Err + exit_on_error ──► record, leave loop
//!                └─► wait for the next tick (interval > 0), aborted early
//!                    if exit is requested; with no interval, yield and
//!                    iterate back-to-back
//! teardown()  ──► record payload/error       (always runs, exactly once)
//! report      ──► one-shot payload of the wrapping Task
//! ```
//!
//! ## Rules
//! - With `interval > 0`, consecutive step **starts** are spaced at least
//!   one interval apart; a step that overruns its tick delays the next one
//!   instead of bursting to catch up.
//! - Raising the exit gate has no defined ordering against a step already
//!   in flight: at most one more step may complete after exit is requested.
//!   Cancellation is cooperative, never preemptive.
//! - `teardown` runs exactly once, whatever ended the loop — exit request,
//!   a step error under `exit_on_error`, or a setup failure.
//! - Step errors with `exit_on_error` disabled are discarded per iteration;
//!   the loop only ends through the gate.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, MissedTickBehavior};

use crate::runner::report::Report;
use crate::runner::stepper::Stepper;
use crate::tasks::{ExitGate, Task, Work};

/// Loop adapter that drives a [`Stepper`] as a single unit of [`Work`].
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use taskcell::{ExitGate, Periodic, StepError, Stepper};
///
/// struct Probe;
///
/// #[async_trait]
/// impl Stepper for Probe {
///     type Payload = ();
///
///     async fn setup(&mut self) -> Result<(), StepError> { Ok(()) }
///     async fn step(&mut self, _gate: &ExitGate) -> Result<(), StepError> {
///         // probe something...
///         Ok(())
///     }
///     async fn teardown(&mut self) -> Result<(), StepError> { Ok(()) }
/// }
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), taskcell::TaskError> {
///     let task = Periodic::new(Probe, Duration::from_secs(1), false).into_task();
///     task.start()?;
///     // ... later, from an operator or signal handler:
///     task.shutdown(Default::default()).await?;
///     let report = task.payload().await?;
///     assert!(report.is_clean());
///     Ok(())
/// }
/// ```
pub struct Periodic<S: Stepper> {
    stepper: S,
    interval: Duration,
    exit_on_error: bool,
}

impl<S: Stepper> Periodic<S> {
    /// Creates a runner over `stepper`.
    ///
    /// `interval` of [`Duration::ZERO`] means no pacing: iterate as fast as
    /// the runtime allows. With `exit_on_error`, the first step error ends
    /// the loop and is recorded in the report; without it, step errors are
    /// discarded and only the exit gate ends the loop.
    pub fn new(stepper: S, interval: Duration, exit_on_error: bool) -> Self {
        Self {
            stepper,
            interval,
            exit_on_error,
        }
    }

    /// Wraps the runner in a [`Task`] delivering the final [`Report`].
    pub fn into_task(self) -> Task<Report<S::Payload>> {
        Task::new(self)
    }

    /// Like [`into_task`](Periodic::into_task), with a lifecycle observer.
    pub fn into_task_with_observer(
        self,
        observer: std::sync::Arc<dyn crate::Observe>,
    ) -> Task<Report<S::Payload>> {
        Task::with_observer(self, observer)
    }
}

#[async_trait]
impl<S: Stepper> Work for Periodic<S> {
    type Output = Report<S::Payload>;

    fn name(&self) -> &str {
        self.stepper.name()
    }

    async fn run(self: Box<Self>, gate: ExitGate) -> Report<S::Payload> {
        let Periodic {
            mut stepper,
            interval,
            exit_on_error,
        } = *self;
        let mut report = Report::default();

        match stepper.setup().await {
            Err(err) => report.setup = Some(err),
            Ok(()) if interval > Duration::ZERO => {
                let mut ticker = time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // the interval's first tick completes immediately; consume
                // it so in-loop waits are full ticks
                ticker.tick().await;

                while gate.keep_running() {
                    if let Err(err) = stepper.step(&gate).await {
                        if exit_on_error {
                            report.step = Some(err);
                            break;
                        }
                    }
                    tokio::select! {
                        _ = ticker.tick() => {}
                        () = gate.exited() => break,
                    }
                }
            }
            Ok(()) => {
                while gate.keep_running() {
                    if let Err(err) = stepper.step(&gate).await {
                        if exit_on_error {
                            report.step = Some(err);
                            break;
                        }
                    }
                    // a step that never awaits would otherwise starve the
                    // runtime, exit requests included
                    tokio::task::yield_now().await;
                }
            }
        }

        match stepper.teardown().await {
            Ok(payload) => report.payload = Some(payload),
            Err(err) => report.teardown = Some(err),
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::error::StepError;

    /// Counts phase invocations; `step` fails once `fail_at` is reached
    /// (0 = never) and raises the gate at `stop_at` (0 = never).
    struct Counting {
        steps: Arc<AtomicU32>,
        teardowns: Arc<AtomicU32>,
        fail_setup: bool,
        fail_at: u32,
        stop_at: u32,
    }

    impl Counting {
        fn new(steps: &Arc<AtomicU32>, teardowns: &Arc<AtomicU32>) -> Self {
            Self {
                steps: steps.clone(),
                teardowns: teardowns.clone(),
                fail_setup: false,
                fail_at: 0,
                stop_at: 0,
            }
        }
    }

    #[async_trait]
    impl Stepper for Counting {
        type Payload = u32;

        async fn setup(&mut self) -> Result<(), StepError> {
            if self.fail_setup {
                return Err(StepError::new("setup failed"));
            }
            Ok(())
        }

        async fn step(&mut self, gate: &ExitGate) -> Result<(), StepError> {
            let n = self.steps.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_at > 0 && n >= self.fail_at {
                return Err(StepError::new("step failed"));
            }
            if self.stop_at > 0 && n >= self.stop_at {
                gate.done();
            }
            Ok(())
        }

        async fn teardown(&mut self) -> Result<u32, StepError> {
            self.teardowns.fetch_add(1, Ordering::SeqCst);
            Ok(self.steps.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn test_exit_on_error_stops_at_failing_step() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let mut stepper = Counting::new(&steps, &teardowns);
        stepper.fail_at = 3;

        let task = Periodic::new(stepper, Duration::ZERO, true).into_task();
        task.start().unwrap();
        let report = task.payload().await.unwrap();

        assert_eq!(steps.load(Ordering::SeqCst), 3);
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
        assert_eq!(report.step, Some(StepError::new("step failed")));
        assert_eq!(report.payload, Some(3));
        assert!(report.setup.is_none());
    }

    #[tokio::test]
    async fn test_step_errors_discarded_without_policy() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let mut stepper = Counting::new(&steps, &teardowns);
        stepper.fail_at = 1; // every step fails

        let task = Periodic::new(stepper, Duration::ZERO, false).into_task();
        task.start().unwrap();

        // iteration keeps going despite the failures
        while steps.load(Ordering::SeqCst) < 5 {
            tokio::task::yield_now().await;
        }
        task.shutdown(CancellationToken::new()).await.unwrap();

        let report = task.payload().await.unwrap();
        assert!(report.step.is_none());
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
        assert!(report.payload.unwrap() >= 5);
    }

    #[tokio::test]
    async fn test_failed_setup_skips_steps_but_not_teardown() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let mut stepper = Counting::new(&steps, &teardowns);
        stepper.fail_setup = true;

        let task = Periodic::new(stepper, Duration::ZERO, true).into_task();
        task.start().unwrap();
        let report = task.payload().await.unwrap();

        assert_eq!(report.setup, Some(StepError::new("setup failed")));
        assert_eq!(steps.load(Ordering::SeqCst), 0);
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
        assert_eq!(report.payload, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_runs_unpaced() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let mut stepper = Counting::new(&steps, &teardowns);
        stepper.stop_at = 1000;

        let started = Instant::now();
        let task = Periodic::new(stepper, Duration::ZERO, false).into_task();
        task.start().unwrap();
        let report = task.payload().await.unwrap();

        assert_eq!(report.payload, Some(1000));
        // no pacing: the paused clock never had to advance
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_spaces_consecutive_steps() {
        struct Stamped {
            inner: Counting,
            at: Arc<Mutex<Vec<Instant>>>,
        }

        #[async_trait]
        impl Stepper for Stamped {
            type Payload = u32;

            async fn setup(&mut self) -> Result<(), StepError> {
                self.inner.setup().await
            }

            async fn step(&mut self, gate: &ExitGate) -> Result<(), StepError> {
                self.at.lock().unwrap().push(Instant::now());
                self.inner.step(gate).await
            }

            async fn teardown(&mut self) -> Result<u32, StepError> {
                self.inner.teardown().await
            }
        }

        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let mut inner = Counting::new(&steps, &teardowns);
        inner.stop_at = 4;
        let at = Arc::new(Mutex::new(Vec::new()));
        let stepper = Stamped {
            inner,
            at: at.clone(),
        };

        let interval = Duration::from_millis(100);
        let task = Periodic::new(stepper, interval, false).into_task();
        task.start().unwrap();
        let report = task.payload().await.unwrap();

        assert_eq!(report.payload, Some(4));
        let stamps = at.lock().unwrap().clone();
        assert_eq!(stamps.len(), 4);
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= interval);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_step_done_stops_before_next_tick() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let mut stepper = Counting::new(&steps, &teardowns);
        stepper.stop_at = 3;

        let started = Instant::now();
        let interval = Duration::from_millis(50);
        let task = Periodic::new(stepper, interval, false).into_task();
        task.start().unwrap();
        let report = task.payload().await.unwrap();

        // exactly three steps, and the loop left without sitting out
        // another tick after the in-step exit request
        assert_eq!(report.payload, Some(3));
        assert_eq!(started.elapsed(), interval * 2);
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exit_before_any_step() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let stepper = Counting::new(&steps, &teardowns);

        let task = Periodic::new(stepper, Duration::from_millis(10), false).into_task();
        task.done();
        assert_eq!(task.start(), Err(crate::TaskError::WasShutdown));
        assert_eq!(steps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_default_stepper_name_flows_to_task() {
        let steps = Arc::new(AtomicU32::new(0));
        let teardowns = Arc::new(AtomicU32::new(0));
        let stepper = Counting::new(&steps, &teardowns);
        let task = Periodic::new(stepper, Duration::ZERO, false).into_task();
        assert_eq!(task.name(), "periodic");
    }
}
