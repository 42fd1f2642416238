// src/config/builtin.rs

//! The task table used when no task file is present.

use std::collections::BTreeMap;

use crate::config::model::{CommandList, ConfigFile, ConfigSection, TaskConfig};
use crate::config::DEFAULT_TASK;

pub const BUILD_DOCS_TASK: &str = "build-docs";
pub const BUILD_DOCS_CMD: &str = "make -C docs html";
pub const DOCS_WATCH_PATTERNS: [&str; 2] = ["./docs/*.rst", "./docs/*.py"];

/// `build-docs` runs the HTML build; `default` runs it once and then
/// rebuilds on every change to the docs sources.
pub fn builtin_config() -> ConfigFile {
    let mut task = BTreeMap::new();

    task.insert(
        BUILD_DOCS_TASK.to_string(),
        TaskConfig {
            desc: Some("Build the HTML documentation".to_string()),
            cmd: CommandList::One(BUILD_DOCS_CMD.to_string()),
            ..TaskConfig::default()
        },
    );

    task.insert(
        DEFAULT_TASK.to_string(),
        TaskConfig {
            desc: Some("Build the docs, then rebuild when they change".to_string()),
            after: vec![BUILD_DOCS_TASK.to_string()],
            watch: DOCS_WATCH_PATTERNS.iter().map(|p| p.to_string()).collect(),
            on_change: vec![BUILD_DOCS_TASK.to_string()],
            ..TaskConfig::default()
        },
    );

    ConfigFile::new_unchecked(ConfigSection::default(), task)
}
