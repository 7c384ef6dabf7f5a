//! # taskcell
//!
//! **Taskcell** is a minimal lifecycle primitive for a single background
//! unit of work, plus a periodic runner built on top of it.
//!
//! It is not a scheduler, a supervisor tree, or a retry framework. It
//! manages one concurrently-running operation: start it at most once,
//! deliver its result exactly once, and stop it cooperatively — plus a
//! "tick until told to stop" pattern for a three-phase procedure.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!          caller                           background (tokio::spawn)
//! ┌─────────────────────────┐            ┌──────────────────────────────┐
//! │ Task<T>                 │  start()   │ work.run(gate)               │
//! │  - exit gate (broadcast)│ ─────────► │   loop { gate.keep_running() │
//! │  - completion gate      │            │          ... }               │
//! │  - one-shot payload slot│            │                              │
//! └───────┬─────────────────┘            └───────────────┬──────────────┘
//!         │ done() / shutdown(ctx)                       │ returns T
//!         ▼                                              ▼
//!   exit gate raised  ──────────────────────►  payload sent (one-shot)
//!   (idempotent, observed cooperatively)       completion gate opened
//!                                              payload() yields T once
//! ```
//!
//! ### Periodic layer
//! ```text
//! Stepper ──► Periodic::new(stepper, interval, exit_on_error).into_task()
//!
//! setup()
//!   └─ ok ─► loop while gate is up {
//!               step()                       // error: record+stop, or discard
//!               wait next tick | gate        // interval > 0 only
//!            }
//! teardown()                                 // always, exactly once
//!   └─► Report { payload, setup, step, teardown } ─► task payload
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits           |
//! |-----------------|----------------------------------------------------------|------------------------------|
//! | **Lifecycle**   | Start once, stop cooperatively, deliver exactly once.    | [`Task`]                     |
//! | **Exit signal** | Broadcast, idempotent, poll or await.                    | [`ExitGate`]                 |
//! | **Work**        | Define units of work as traits or closures.              | [`Work`], [`WorkFn`]         |
//! | **Periodic**    | Drive a three-phase stepper at an optional interval.     | [`Stepper`], [`Periodic`]    |
//! | **Reports**     | Per-phase outcomes of a periodic run.                    | [`Report`], [`StepError`]    |
//! | **Errors**      | Typed misuse/cancellation errors for the control API.    | [`TaskError`]                |
//! | **Observation** | Hook into lifecycle transitions.                         | [`Observe`], [`Event`]       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use taskcell::{ExitGate, Task, WorkFn};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), taskcell::TaskError> {
//!     let task = Task::new(WorkFn::new("pump", |gate: ExitGate| async move {
//!         let mut moved = 0u64;
//!         while gate.keep_running() {
//!             moved += 1; // move one unit of data...
//!             tokio::task::yield_now().await;
//!         }
//!         moved
//!     }));
//!
//!     task.start()?;
//!
//!     // operator-driven stop: signal, then wait (abortable via the token)
//!     task.shutdown(CancellationToken::new()).await?;
//!
//!     let moved = task.payload().await?;
//!     println!("pumped {moved} units");
//!     Ok(())
//! }
//! ```

mod error;
mod events;
mod observe;
mod runner;
mod tasks;

// ---- Public re-exports ----

pub use error::{StepError, TaskError};
pub use events::{Event, EventKind};
pub use observe::Observe;
pub use runner::{Periodic, Report, Stepper};
pub use tasks::{ExitGate, Task, Work, WorkFn};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observe::LogWriter;
