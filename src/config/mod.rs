// src/config/mod.rs

//! Task configuration for doctask.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Provide the built-in task table used when no file is given (`builtin.rs`).
//! - Load a task file from disk (`loader.rs`).
//! - Validate names, prerequisites and patterns (`validate.rs`).

pub mod builtin;
pub mod loader;
pub mod model;
pub mod validate;

pub use builtin::builtin_config;
pub use loader::{default_config_path, load_and_validate, load_from_path, parse_and_validate};
pub use model::{CommandList, ConfigFile, ConfigSection, RawConfigFile, TaskConfig};

/// Task run when none is named on the command line.
pub const DEFAULT_TASK: &str = "default";
