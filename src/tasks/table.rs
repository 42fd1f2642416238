// src/tasks/table.rs

use std::collections::BTreeMap;

use crate::config::model::{ConfigFile, ConfigSection};
use crate::engine::TaskName;
use crate::errors::{DoctaskError, Result};

/// Resolved definition of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDef {
    pub name: TaskName,
    pub desc: Option<String>,
    /// Shell commands, run in order.
    pub cmd: Vec<String>,
    /// Prerequisites (`after = [...]`).
    pub after: Vec<TaskName>,
    pub watch: Vec<String>,
    pub exclude: Vec<String>,
    /// Tasks re-run on each qualifying change.
    pub on_change: Vec<TaskName>,
}

impl TaskDef {
    /// True if invoking this task ends in a watch loop.
    pub fn is_watching(&self) -> bool {
        !self.watch.is_empty()
    }
}

/// Process-wide task table.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TaskTable {
    tasks: BTreeMap<TaskName, TaskDef>,
    settings: ConfigSection,
}

impl TaskTable {
    /// The table used when no task file is present.
    pub fn builtin() -> Self {
        Self::from_config(crate::config::builtin_config())
    }

    /// Build the table from a validated [`ConfigFile`].
    pub fn from_config(cfg: ConfigFile) -> Self {
        let tasks = cfg
            .task
            .into_iter()
            .map(|(name, task)| {
                let on_change = task.effective_on_change().to_vec();
                let def = TaskDef {
                    name: name.clone(),
                    desc: task.desc,
                    cmd: task.cmd.into_vec(),
                    after: task.after,
                    watch: task.watch,
                    exclude: task.exclude,
                    on_change,
                };
                (name, def)
            })
            .collect();

        Self {
            tasks,
            settings: cfg.config,
        }
    }

    /// Look up a task by name.
    pub fn get(&self, name: &str) -> Result<&TaskDef> {
        self.tasks
            .get(name)
            .ok_or_else(|| DoctaskError::TaskNotFound(name.to_string()))
    }

    /// All tasks, sorted by name.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskDef> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn settings(&self) -> &ConfigSection {
        &self.settings
    }
}
