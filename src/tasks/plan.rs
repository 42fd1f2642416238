// src/tasks/plan.rs

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{DoctaskError, Result};
use crate::tasks::table::{TaskDef, TaskTable};

/// Resolve the ordered list of tasks one invocation of `name` runs.
///
/// Prerequisites come first, depth-first in declaration order, and the task
/// itself last. A task reached through several paths runs once, at its first
/// position.
pub fn plan<'a>(table: &'a TaskTable, name: &str) -> Result<Vec<&'a TaskDef>> {
    let mut order = Vec::new();
    let mut done: HashSet<&str> = HashSet::new();
    let mut visiting: HashSet<&str> = HashSet::new();

    visit(table, name, &mut done, &mut visiting, &mut order)?;

    let names: Vec<&str> = order.iter().map(|t| t.name.as_str()).collect();
    debug!(task = %name, plan = ?names, "resolved task plan");
    Ok(order)
}

fn visit<'a>(
    table: &'a TaskTable,
    name: &str,
    done: &mut HashSet<&'a str>,
    visiting: &mut HashSet<&'a str>,
    order: &mut Vec<&'a TaskDef>,
) -> Result<()> {
    let task = table.get(name)?;
    if done.contains(task.name.as_str()) {
        return Ok(());
    }
    if !visiting.insert(task.name.as_str()) {
        return Err(DoctaskError::DagCycle(format!(
            "cycle detected in `after` chain involving task '{}'",
            task.name
        )));
    }

    for dep in task.after.iter() {
        visit(table, dep, done, visiting, order)?;
    }

    visiting.remove(task.name.as_str());
    done.insert(task.name.as_str());
    order.push(task);
    Ok(())
}
