// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `CommandRunner` seam the engine talks to, so
//!   tests can record invocations instead of spawning processes.
//! - [`command`] is the production implementation: one shell process per
//!   command via `tokio::process::Command`.

pub mod backend;
pub mod command;

pub use backend::{CommandInvocation, CommandRunner};
pub use command::{run_shell_command, ShellRunner};
