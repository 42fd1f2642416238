// src/exec/command.rs

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::info;

use crate::engine::TaskOutcome;
use crate::errors::Result;
use crate::exec::backend::{CommandInvocation, CommandRunner};

/// Runs each command through the platform shell in a fixed working
/// directory, sharing the terminal's stdout/stderr.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    workdir: PathBuf,
}

impl ShellRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(
        &mut self,
        invocation: CommandInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + '_>> {
        let workdir = self.workdir.clone();
        Box::pin(async move { run_shell_command(&workdir, &invocation).await })
    }
}

/// Spawn one shell process for `invocation` and wait for it.
///
/// The child is killed if this future is dropped before it exits.
pub async fn run_shell_command(
    workdir: &Path,
    invocation: &CommandInvocation,
) -> Result<TaskOutcome> {
    info!(task = %invocation.task, cmd = %invocation.command, "starting command");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&invocation.command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&invocation.command);
        c
    };

    cmd.current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for task '{}'", invocation.task))?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{}'", invocation.task))?;

    let code = status.code().unwrap_or(-1);
    info!(
        task = %invocation.task,
        exit_code = code,
        success = status.success(),
        "command exited"
    );

    Ok(if status.success() {
        TaskOutcome::Success
    } else {
        TaskOutcome::Failed(code)
    })
}
