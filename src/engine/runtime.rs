// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::queue::{PendingRun, TriggerQueue};
use crate::engine::runner::TaskRunner;
use crate::engine::{RuntimeEvent, RuntimeOptions, TriggerReason};
use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::watch::WatchSet;

enum Flow {
    Continue,
    Shutdown,
}

/// Watch-mode event loop.
///
/// Consumes `RuntimeEvent`s, re-runs the watch set's `on_change` targets for
/// qualifying changes, and keeps listening while a run is in progress so
/// that changes made during a build are folded into a single follow-up run.
pub struct Runtime<R: CommandRunner> {
    watch: WatchSet,
    runner: TaskRunner<R>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    queue: TriggerQueue,
    options: RuntimeOptions,
}

impl<R: CommandRunner> fmt::Debug for Runtime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("watch", &self.watch)
            .field("queue", &self.queue)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> Runtime<R> {
    pub fn new(
        watch: WatchSet,
        runner: TaskRunner<R>,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            watch,
            runner,
            event_rx,
            queue: TriggerQueue::new(),
            options,
        }
    }

    /// Main event loop.
    ///
    /// Only returns on `ShutdownRequested`, when every event sender is gone,
    /// or with the error of a failed re-run when `ignore_errors` is off.
    pub async fn run(mut self) -> Result<()> {
        info!(
            task = %self.watch.task(),
            patterns = ?self.watch.patterns(),
            "watching for changes"
        );

        loop {
            if let Some(pending) = self.queue.take() {
                match self.rerun(pending).await? {
                    Flow::Continue => continue,
                    Flow::Shutdown => break,
                }
            }

            match self.event_rx.recv().await {
                Some(RuntimeEvent::PathsChanged { paths }) => {
                    record_changes(&self.watch, &mut self.queue, &paths);
                }
                Some(RuntimeEvent::ShutdownRequested) => {
                    info!("shutdown requested, stopping runtime");
                    break;
                }
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            }
        }

        info!("runtime exiting");
        Ok(())
    }

    /// Run every `on_change` target once, still listening for events.
    async fn rerun(&mut self, pending: PendingRun) -> Result<Flow> {
        info!(
            path = %pending.path,
            coalesced = pending.coalesced,
            "change detected, re-running"
        );

        let targets = self.watch.on_change().to_vec();
        for target in targets {
            let run = self.runner.run(&target, TriggerReason::FileWatch);
            tokio::pin!(run);

            let result = loop {
                tokio::select! {
                    res = &mut run => break res,
                    event = self.event_rx.recv() => match event {
                        Some(RuntimeEvent::PathsChanged { paths }) => {
                            record_changes(&self.watch, &mut self.queue, &paths);
                        }
                        Some(RuntimeEvent::ShutdownRequested) | None => {
                            // Dropping `run` kills the in-flight process.
                            info!(task = %target, "shutdown requested during run, stopping runtime");
                            return Ok(Flow::Shutdown);
                        }
                    },
                }
            };

            if let Err(err) = result {
                if self.options.ignore_errors {
                    warn!(task = %target, error = %err, "re-run failed; still watching");
                    break;
                }
                return Err(err);
            }
        }

        Ok(Flow::Continue)
    }
}

fn record_changes(watch: &WatchSet, queue: &mut TriggerQueue, paths: &[String]) {
    match watch.first_match(paths) {
        Some(path) => queue.record_trigger(path),
        None => debug!(?paths, "change does not match any watch pattern; ignoring"),
    }
}
