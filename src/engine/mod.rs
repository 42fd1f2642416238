// src/engine/mod.rs

//! Execution engine for doctask.
//!
//! - [`runner`] turns a task name into its plan and runs every command in
//!   order through a [`CommandRunner`](crate::exec::CommandRunner).
//! - [`queue`] coalesces changes that arrive while a run is in progress.
//! - [`runtime`] is the watch-mode event loop reacting to file changes and
//!   shutdown requests.

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// Outcome of one command process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed(i32),
}

/// Why a task was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Named on the command line.
    Manual,
    /// Re-run after a watched file changed.
    FileWatch,
}

/// Options for the watch-mode runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Keep watching when a re-run fails instead of returning the error.
    pub ignore_errors: bool,
}

/// Events flowing into the runtime from the watcher and the signal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Root-relative paths reported changed by the filesystem watcher.
    PathsChanged { paths: Vec<String> },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod queue;
pub mod runner;
pub mod runtime;

pub use queue::{PendingRun, TriggerQueue};
pub use runner::TaskRunner;
pub use runtime::Runtime;
