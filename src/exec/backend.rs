// src/exec/backend.rs

//! Pluggable command execution.
//!
//! `ShellRunner` is what `doctask` uses; tests provide a runner that records
//! each `CommandInvocation` and reports a canned outcome.

use std::future::Future;
use std::pin::Pin;

use crate::engine::{TaskName, TaskOutcome};
use crate::errors::Result;

/// One command of one task, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub task: TaskName,
    pub command: String,
}

/// Executes commands on behalf of the engine.
pub trait CommandRunner: Send {
    /// Run a single command to completion.
    ///
    /// `Err` is reserved for failing to run the command at all; a command
    /// that ran and exited non-zero is `Ok(TaskOutcome::Failed(code))`.
    fn run(
        &mut self,
        invocation: CommandInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + '_>>;
}
