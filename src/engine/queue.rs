// src/engine/queue.rs

use tracing::debug;

/// A re-run waiting to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRun {
    /// First changed path that asked for this run.
    pub path: String,
    /// Further changes folded into the same run.
    pub coalesced: usize,
}

/// Changes that arrive while a run is in progress.
///
/// At most one re-run is ever pending: however many files change during a
/// build, the build runs once more afterwards, and runs never overlap.
#[derive(Debug, Default)]
pub struct TriggerQueue {
    pending: Option<PendingRun>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    /// Record a qualifying change.
    pub fn record_trigger(&mut self, path: &str) {
        match self.pending.as_mut() {
            Some(run) => {
                run.coalesced += 1;
                debug!(path = %path, coalesced = run.coalesced, "merged change into pending run");
            }
            None => {
                debug!(path = %path, "queued re-run");
                self.pending = Some(PendingRun {
                    path: path.to_string(),
                    coalesced: 0,
                });
            }
        }
    }

    /// Take the pending run, leaving the queue empty.
    pub fn take(&mut self) -> Option<PendingRun> {
        self.pending.take()
    }
}
