// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DoctaskError, Result};
use crate::watch::patterns::compile_globset;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DoctaskError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_shapes(cfg)?;
    validate_task_references(cfg)?;
    validate_patterns(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(DoctaskError::Config(
            "task file must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_shapes(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if name.trim().is_empty() {
            return Err(DoctaskError::Config("task names must not be empty".to_string()));
        }
        if task.cmd.as_slice().iter().any(|c| c.trim().is_empty()) {
            return Err(DoctaskError::Config(format!(
                "task '{name}' has an empty command in `cmd`"
            )));
        }
        if task.cmd.as_slice().is_empty() && task.after.is_empty() && task.watch.is_empty() {
            return Err(DoctaskError::Config(format!(
                "task '{name}' has no `cmd`, `after` or `watch`; it would do nothing"
            )));
        }
        if task.watch.is_empty() && (!task.exclude.is_empty() || !task.on_change.is_empty()) {
            return Err(DoctaskError::Config(format!(
                "task '{name}' sets `exclude` or `on_change` without `watch`"
            )));
        }
        if !task.watch.is_empty() && task.effective_on_change().is_empty() {
            return Err(DoctaskError::Config(format!(
                "task '{name}' watches files but has nothing to re-run; set `on_change` or `after`"
            )));
        }
    }
    Ok(())
}

fn validate_task_references(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            if dep == name {
                return Err(DoctaskError::Config(format!(
                    "task '{name}' cannot depend on itself in `after`"
                )));
            }
            if !cfg.task.contains_key(dep) {
                return Err(DoctaskError::Config(format!(
                    "task '{name}' has unknown dependency '{dep}' in `after`"
                )));
            }
        }
        for target in task.on_change.iter() {
            if !cfg.task.contains_key(target) {
                return Err(DoctaskError::Config(format!(
                    "task '{name}' has unknown task '{target}' in `on_change`"
                )));
            }
        }
    }
    Ok(())
}

fn validate_patterns(cfg: &RawConfigFile) -> Result<()> {
    for task in cfg.task.values() {
        compile_globset(&task.watch)?;
        compile_globset(&task.exclude)?;
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> task.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(DoctaskError::DagCycle(format!(
            "cycle detected in `after` chain involving task '{}'",
            cycle.node_id()
        ))),
    }
}
