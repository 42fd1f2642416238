// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoctaskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Cycle detected in task prerequisites: {0}")]
    DagCycle(String),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("task '{task}' failed: `{command}` exited with code {code}")]
    CommandFailed {
        task: String,
        command: String,
        code: i32,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoctaskError {
    /// Process exit code the binary should use for this error.
    ///
    /// A failed command passes its own exit code through; everything else
    /// maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DoctaskError::CommandFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DoctaskError>;
