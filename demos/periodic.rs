//! # Example: periodic
//!
//! A three-phase stepper driven at a fixed interval, self-terminating from
//! inside `step`, with lifecycle events printed by [`LogWriter`].
//!
//! Demonstrates how to:
//! - Implement [`Stepper`] (setup / step / teardown).
//! - Stop a finite run from inside `step` via [`ExitGate::done`].
//! - Read per-phase outcomes from the final [`Report`].
//!
//! ## Flow
//! ```text
//! Sampler ──► Periodic::new(sampler, 250ms, exit_on_error)
//!                 .into_task_with_observer(LogWriter)
//!     ├─► [started]
//!     ├─► setup()
//!     ├─► step() every 250ms, gate.done() after 5 samples
//!     ├─► teardown() ──► Report { payload: Some(avg), .. }
//!     └─► [finished]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example periodic --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use taskcell::{ExitGate, LogWriter, Periodic, StepError, Stepper};

/// Samples a (pretend) sensor a fixed number of times and reports the mean.
struct Sampler {
    readings: Vec<u64>,
    target: usize,
}

#[async_trait]
impl Stepper for Sampler {
    type Payload = u64;

    fn name(&self) -> &str {
        "sampler"
    }

    async fn setup(&mut self) -> Result<(), StepError> {
        println!("[sampler] opening sensor");
        self.readings.clear();
        Ok(())
    }

    async fn step(&mut self, gate: &ExitGate) -> Result<(), StepError> {
        let reading = 40 + (self.readings.len() as u64 % 5);
        println!("[sampler] reading {} = {reading}", self.readings.len() + 1);
        self.readings.push(reading);

        if self.readings.len() >= self.target {
            // enough samples: stop before the next tick
            gate.done();
        }
        Ok(())
    }

    async fn teardown(&mut self) -> Result<u64, StepError> {
        println!("[sampler] closing sensor");
        if self.readings.is_empty() {
            return Err(StepError::new("no samples collected"));
        }
        Ok(self.readings.iter().sum::<u64>() / self.readings.len() as u64)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the stepper and wrap it in a paced runner
    let sampler = Sampler {
        readings: Vec::new(),
        target: 5,
    };
    let task = Periodic::new(sampler, Duration::from_millis(250), true)
        .into_task_with_observer(Arc::new(LogWriter));

    // 2. Start and wait for the self-terminating run to finish
    task.start()?;
    let report = task.payload().await?;

    // 3. Inspect the per-phase outcomes
    println!("[main] clean={} mean={:?}", report.is_clean(), report.payload);

    Ok(())
}
