// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod tasks;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_and_validate};
use crate::engine::{Runtime, RuntimeEvent, RuntimeOptions, TaskRunner, TriggerReason};
use crate::errors::Result;
use crate::exec::{CommandRunner, ShellRunner};
use crate::tasks::{plan, TaskDef, TaskTable};
use crate::watch::{spawn_watcher, WatchSet};

/// High-level entry point used by `main.rs`.
///
/// Loads the task table (task file or built-in), handles `--list` and
/// `--dry-run`, and otherwise runs the task through the shell backend.
pub async fn run(args: CliArgs) -> Result<()> {
    let (table, root) = load_task_table(args.config.as_deref())?;

    if args.list {
        print_task_list(&table);
        return Ok(());
    }

    if args.dry_run {
        let task = table.get(&args.task)?;
        print_dry_run(&table, task)?;
        return Ok(());
    }

    let backend = ShellRunner::new(root.clone());
    run_task(table, root, &args.task, backend).await
}

/// Run `name` once, then, for a watching task, watch its patterns under
/// `root` until Ctrl-C.
///
/// This wires together:
/// - the task runner with the given backend
/// - for watching tasks: the file watcher, Ctrl-C handling and the runtime
pub async fn run_task<R: CommandRunner>(
    table: TaskTable,
    root: PathBuf,
    name: &str,
    backend: R,
) -> Result<()> {
    let task = table.get(name)?.clone();
    let table = Arc::new(table);
    let settings = table.settings().clone();
    let mut runner = TaskRunner::new(Arc::clone(&table), backend);

    // Initial run; a failure here propagates before anything is watched.
    runner.run(&task.name, TriggerReason::Manual).await?;

    if !task.is_watching() {
        return Ok(());
    }

    let watch_set = WatchSet::compile(&task)?;
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _watcher_handle = spawn_watcher(root, watch_set.clone(), rt_tx.clone(), settings.use_hash)?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let options = RuntimeOptions {
        ignore_errors: settings.ignore_errors,
    };
    let runtime = Runtime::new(watch_set, runner, rt_rx, options);
    runtime.run().await
}

/// Resolve the task table and the project root from the working directory.
///
/// See [`load_task_table_from`].
pub fn load_task_table(config: Option<&str>) -> Result<(TaskTable, PathBuf)> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_task_table_from(config.map(Path::new), &cwd)
}

/// Resolve the task table and the project root commands run in.
///
/// - `--config PATH`: that file (relative to `cwd`); root is the file's
///   directory.
/// - otherwise `Doctask.toml` in `cwd` if present; root is `cwd`.
/// - otherwise the built-in table; root is `cwd`.
///
/// A task file's `[config] root` is taken relative to the file's directory.
pub fn load_task_table_from(config: Option<&Path>, cwd: &Path) -> Result<(TaskTable, PathBuf)> {
    let path = match config {
        Some(path) => cwd.join(path),
        None => {
            let path = cwd.join(default_config_path());
            if !path.is_file() {
                debug!("no task file found; using built-in tasks");
                return Ok((TaskTable::builtin(), cwd.to_path_buf()));
            }
            path
        }
    };

    let cfg = load_and_validate(&path)?;
    let root = match cfg.config.root {
        Some(ref dir) => config_root_dir(&path, cwd).join(dir),
        None => config_root_dir(&path, cwd),
    };
    info!(config = ?path, root = ?root, "loaded task file");
    Ok((TaskTable::from_config(cfg), root))
}

/// Directory containing the task file, or `cwd` for a bare file name.
fn config_root_dir(config_path: &Path, cwd: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}

fn print_task_list(table: &TaskTable) {
    println!("tasks ({}):", table.len());
    for task in table.tasks() {
        match task.desc {
            Some(ref desc) => println!("  {:<16} {desc}", task.name),
            None => println!("  {}", task.name),
        }
    }
}

/// Print what `task` would run and watch.
fn print_dry_run(table: &TaskTable, task: &TaskDef) -> Result<()> {
    println!("doctask dry-run: {}", task.name);
    println!();

    for step in plan(table, &task.name)? {
        println!("  - {}", step.name);
        for cmd in step.cmd.iter() {
            println!("      cmd: {cmd}");
        }
    }

    if task.is_watching() {
        println!();
        println!("  watch: {:?}", task.watch);
        if !task.exclude.is_empty() {
            println!("  exclude: {:?}", task.exclude);
        }
        println!("  on change: {:?}", task.on_change);
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
