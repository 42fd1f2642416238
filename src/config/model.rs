// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level task file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// ignore_errors = false
///
/// [task.build-docs]
/// cmd = "make -C docs html"
///
/// [task.default]
/// after = ["build-docs"]
/// watch = ["./docs/*.rst", "./docs/*.py"]
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// A validated task file.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// the built-in table, so holders can rely on names, prerequisites and
/// patterns being sound.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        task: BTreeMap<String, TaskConfig>,
    ) -> Self {
        Self { config, task }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Directory commands run in and watch patterns are relative to,
    /// resolved against the task file's own directory.
    ///
    /// Unset means the task file's directory.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Keep watching when a re-run triggered by a file change fails.
    ///
    /// The initial run always propagates its failure.
    #[serde(default)]
    pub ignore_errors: bool,

    /// Only treat a change as real when the file's content hash changed.
    #[serde(default)]
    pub use_hash: bool,
}

/// One or more shell commands; TOML accepts a bare string or a list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandList {
    One(String),
    Many(Vec<String>),
}

impl Default for CommandList {
    fn default() -> Self {
        CommandList::Many(Vec::new())
    }
}

impl CommandList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            CommandList::One(cmd) => vec![cmd],
            CommandList::Many(cmds) => cmds,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            CommandList::One(cmd) => std::slice::from_ref(cmd),
            CommandList::Many(cmds) => cmds.as_slice(),
        }
    }
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Short description shown by `--list`.
    #[serde(default)]
    pub desc: Option<String>,

    /// Shell command(s) run in order when the task is invoked.
    #[serde(default)]
    pub cmd: CommandList,

    /// Tasks that run (once each) before this one.
    #[serde(default)]
    pub after: Vec<String>,

    /// Glob patterns; a non-empty list turns the task into a watching task.
    #[serde(default)]
    pub watch: Vec<String>,

    /// Glob patterns removed from the `watch` set.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Tasks re-run on each qualifying change.
    ///
    /// Empty means "re-run the prerequisites in `after`".
    #[serde(default)]
    pub on_change: Vec<String>,
}

impl TaskConfig {
    /// Targets re-run when a watched file changes.
    pub fn effective_on_change(&self) -> &[String] {
        if self.on_change.is_empty() {
            &self.after
        } else {
            &self.on_change
        }
    }
}
