#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use doctask::config::parse_and_validate;
use doctask::engine::{TaskOutcome, TaskRunner, TriggerReason};
use doctask::errors::DoctaskError;
use doctask::exec::{run_shell_command, CommandInvocation, ShellRunner};
use doctask::tasks::TaskTable;
use doctask_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn invocation(command: &str) -> CommandInvocation {
    CommandInvocation {
        task: "shell".to_string(),
        command: command.to_string(),
    }
}

#[tokio::test]
async fn zero_exit_is_success() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let outcome = with_timeout(run_shell_command(dir.path(), &invocation("true"))).await?;
    assert_eq!(outcome, TaskOutcome::Success);

    Ok(())
}

#[tokio::test]
async fn non_zero_exit_code_is_reported() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let outcome = with_timeout(run_shell_command(dir.path(), &invocation("exit 3"))).await?;
    assert_eq!(outcome, TaskOutcome::Failed(3));

    Ok(())
}

#[tokio::test]
async fn missing_tool_fails_with_the_shell_exit_code() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let outcome = with_timeout(run_shell_command(
        dir.path(),
        &invocation("doctask-no-such-tool --html"),
    ))
    .await?;
    assert_eq!(outcome, TaskOutcome::Failed(127));

    Ok(())
}

#[tokio::test]
async fn commands_run_in_the_project_root() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let cfg = parse_and_validate(
        r#"
[task.build-docs]
cmd = ["mkdir -p docs/_build/html", "echo built > docs/_build/html/index.html"]
"#,
    )?;
    let mut runner = TaskRunner::new(
        Arc::new(TaskTable::from_config(cfg)),
        ShellRunner::new(dir.path()),
    );

    with_timeout(runner.run("build-docs", TriggerReason::Manual)).await?;

    let html = fs::read_to_string(dir.path().join("docs/_build/html/index.html"))?;
    assert_eq!(html.trim(), "built");

    Ok(())
}

#[tokio::test]
async fn failing_shell_command_becomes_command_failed() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let cfg = parse_and_validate(
        r#"
[task.build-docs]
cmd = ["exit 4", "touch never"]
"#,
    )?;
    let mut runner = TaskRunner::new(
        Arc::new(TaskTable::from_config(cfg)),
        ShellRunner::new(dir.path()),
    );

    let err = with_timeout(runner.run("build-docs", TriggerReason::Manual))
        .await
        .expect_err("exit 4 should fail");

    assert!(matches!(err, DoctaskError::CommandFailed { code: 4, .. }));
    assert_eq!(err.exit_code(), 4);
    assert!(!dir.path().join("never").exists());

    Ok(())
}
