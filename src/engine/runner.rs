// src/engine/runner.rs

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::engine::{TaskOutcome, TriggerReason};
use crate::errors::{DoctaskError, Result};
use crate::exec::{CommandInvocation, CommandRunner};
use crate::tasks::{plan, TaskTable};

/// Runs tasks from the table, prerequisites first, through a
/// [`CommandRunner`].
pub struct TaskRunner<R: CommandRunner> {
    table: Arc<TaskTable>,
    backend: R,
}

impl<R: CommandRunner> fmt::Debug for TaskRunner<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRunner")
            .field("tasks", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> TaskRunner<R> {
    pub fn new(table: Arc<TaskTable>, backend: R) -> Self {
        Self { table, backend }
    }

    /// Run `name` and everything it depends on.
    ///
    /// Commands run one at a time in plan order. The first failing command
    /// stops the run with [`DoctaskError::CommandFailed`].
    pub async fn run(&mut self, name: &str, reason: TriggerReason) -> Result<()> {
        let table = Arc::clone(&self.table);
        let steps = plan(&table, name)?;
        info!(task = %name, ?reason, steps = steps.len(), "running task");

        for task in steps {
            for command in task.cmd.iter() {
                let invocation = CommandInvocation {
                    task: task.name.clone(),
                    command: command.clone(),
                };

                match self.backend.run(invocation).await? {
                    TaskOutcome::Success => {}
                    TaskOutcome::Failed(code) => {
                        warn!(task = %task.name, cmd = %command, exit_code = code, "command failed");
                        return Err(DoctaskError::CommandFailed {
                            task: task.name.clone(),
                            command: command.clone(),
                            code,
                        });
                    }
                }
            }
            debug!(task = %task.name, "task finished");
        }

        info!(task = %name, "task completed successfully");
        Ok(())
    }
}
