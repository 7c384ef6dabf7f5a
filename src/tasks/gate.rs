//! # Cooperative exit signal.
//!
//! [`ExitGate`] is the broadcast signal a running [`Work`](crate::Work)
//! observes to know when to stop. Raising it never interrupts the work;
//! it only becomes visible at the work's next check.
//!
//! Clones share the same underlying gate. Any number of observers may poll
//! [`keep_running`](ExitGate::keep_running) or wait on
//! [`exited`](ExitGate::exited) simultaneously without blocking each other.

use tokio_util::sync::CancellationToken;

/// Cloneable handle to a task's exit signal.
///
/// The gate starts lowered. [`done`](ExitGate::done) raises it; once raised
/// it stays raised forever, and raising it again is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ExitGate {
    token: CancellationToken,
}

impl ExitGate {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Requests exit. Idempotent; never blocks, never fails.
    pub fn done(&self) {
        self.token.cancel();
    }

    /// Returns `true` until exit has been requested, `false` forever after.
    ///
    /// Lock-free; intended as the loop condition of polling work:
    /// `while gate.keep_running() { ... }`.
    pub fn keep_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Returns `true` once exit has been requested.
    pub fn is_exit_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until exit is requested.
    ///
    /// Completes immediately if exit was already requested. Safe to await
    /// from any number of tasks simultaneously; typically used in a
    /// `tokio::select!` against the work's own pending operation.
    pub async fn exited(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keep_running_flips_once() {
        let gate = ExitGate::new();
        assert!(gate.keep_running());
        assert!(!gate.is_exit_requested());

        gate.done();
        assert!(!gate.keep_running());
        assert!(gate.is_exit_requested());

        // repeated raise stays raised
        gate.done();
        assert!(!gate.keep_running());
    }

    #[tokio::test]
    async fn test_clones_share_the_gate() {
        let gate = ExitGate::new();
        let other = gate.clone();
        other.done();
        assert!(!gate.keep_running());
    }

    #[tokio::test]
    async fn test_exited_releases_multiple_waiters() {
        let gate = ExitGate::new();

        let mut waiters = Vec::new();
        for _ in 0..3 {
            let g = gate.clone();
            waiters.push(tokio::spawn(async move { g.exited().await }));
        }

        gate.done();
        for w in waiters {
            w.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_exited_after_done_is_immediate() {
        let gate = ExitGate::new();
        gate.done();
        gate.exited().await;
    }
}
