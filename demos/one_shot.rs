//! # Example: one_shot
//!
//! Minimal example of a single unit of work with cooperative shutdown.
//!
//! Demonstrates how to:
//! - Define work using [`WorkFn`].
//! - Wrap it in a [`Task`] and start it.
//! - Request exit with `shutdown` and collect the payload.
//!
//! ## Flow
//! ```text
//! WorkFn ──► Task::new() ──► start()
//!                              ├─► work loops on gate.keep_running()
//!                              ├─► shutdown(ctx) raises the exit gate
//!                              ├─► work observes it, returns its count
//!                              └─► payload() yields the count once
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example one_shot
//! ```

use std::time::Duration;

use taskcell::{ExitGate, Task, WorkFn};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Define the work: count beats until told to stop
    let task = Task::new(WorkFn::new("heartbeat", |gate: ExitGate| async move {
        let mut beats = 0u64;
        while gate.keep_running() {
            beats += 1;
            println!("[heartbeat] beat {beats}");
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        beats
    }));

    // 2. Start it on the runtime
    task.start()?;

    // 3. Let it run for a moment
    tokio::time::sleep(Duration::from_secs(1)).await;

    // 4. Request exit and wait for the work to notice
    task.shutdown(CancellationToken::new()).await?;

    // 5. Collect the payload (claimable exactly once)
    let beats = task.payload().await?;
    println!("[main] final count: {beats}");

    Ok(())
}
