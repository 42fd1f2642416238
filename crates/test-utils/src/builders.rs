#![allow(dead_code)]

use std::collections::BTreeMap;

use doctask::config::{CommandList, ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
use doctask::tasks::TaskTable;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn ignore_errors(mut self, val: bool) -> Self {
        self.config.config.ignore_errors = val;
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.config.config.use_hash = val;
        self
    }

    /// The unvalidated model, for tests exercising validation.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build_table(self) -> TaskTable {
        TaskTable::from_config(self.build())
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    /// A task running a single command.
    pub fn new(cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                cmd: CommandList::One(cmd.to_string()),
                ..TaskConfig::default()
            },
        }
    }

    /// A task with no command of its own.
    pub fn empty() -> Self {
        Self {
            task: TaskConfig::default(),
        }
    }

    pub fn desc(mut self, desc: &str) -> Self {
        self.task.desc = Some(desc.to_string());
        self
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        let mut cmds = std::mem::take(&mut self.task.cmd).into_vec();
        cmds.push(cmd.to_string());
        self.task.cmd = CommandList::Many(cmds);
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn watch(mut self, pattern: &str) -> Self {
        self.task.watch.push(pattern.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.task.exclude.push(pattern.to_string());
        self
    }

    pub fn on_change(mut self, target: &str) -> Self {
        self.task.on_change.push(target.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
