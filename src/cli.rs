// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `doctask`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "doctask",
    version,
    about = "Build the documentation and rebuild it when its sources change.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run.
    #[arg(value_name = "TASK", default_value = crate::config::DEFAULT_TASK)]
    pub task: String,

    /// Path to a task file (TOML).
    ///
    /// Default: `Doctask.toml` in the current directory if it exists,
    /// otherwise the built-in tasks.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// List the available tasks and exit.
    #[arg(long)]
    pub list: bool,

    /// Print what the task would run and watch, without running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DOCTASK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
