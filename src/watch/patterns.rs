// src/watch/patterns.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::engine::TaskName;
use crate::errors::{DoctaskError, Result};
use crate::tasks::TaskDef;

/// Strip leading `./` segments; patterns and paths are root-relative.
pub fn normalize_pattern(pattern: &str) -> &str {
    let mut p = pattern;
    while let Some(rest) = p.strip_prefix("./") {
        p = rest;
    }
    p
}

/// Compile patterns into a `GlobSet`.
///
/// Wildcards do not cross `/`; only `**` matches across directories.
pub fn compile_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(normalize_pattern(pat))
            .literal_separator(true)
            .build()
            .map_err(|source| DoctaskError::Pattern {
                pattern: pat.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| DoctaskError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Compiled watch configuration of one watching task.
#[derive(Clone)]
pub struct WatchSet {
    task: TaskName,
    patterns: Vec<String>,
    include: GlobSet,
    exclude: GlobSet,
    on_change: Vec<TaskName>,
}

impl fmt::Debug for WatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSet")
            .field("task", &self.task)
            .field("patterns", &self.patterns)
            .field("on_change", &self.on_change)
            .finish_non_exhaustive()
    }
}

impl WatchSet {
    pub fn compile(task: &TaskDef) -> Result<Self> {
        Ok(Self {
            task: task.name.clone(),
            patterns: task.watch.clone(),
            include: compile_globset(&task.watch)?,
            exclude: compile_globset(&task.exclude)?,
            on_change: task.on_change.clone(),
        })
    }

    /// Name of the task that owns this watch.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Patterns exactly as configured.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Tasks re-run on a qualifying change.
    pub fn on_change(&self) -> &[TaskName] {
        &self.on_change
    }

    /// True if a root-relative path (e.g. `docs/index.rst`) qualifies.
    pub fn matches(&self, rel_path: &str) -> bool {
        let rel_path = normalize_pattern(rel_path);
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }

    /// First qualifying path of a batch, if any.
    pub fn first_match<'p>(&self, paths: &'p [String]) -> Option<&'p str> {
        paths
            .iter()
            .map(String::as_str)
            .find(|p| self.matches(p))
    }

    /// Directories the filesystem watcher has to observe.
    pub fn roots(&self) -> Vec<WatchRoot> {
        watch_roots(&self.patterns)
    }
}

/// A directory to watch, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRoot {
    pub dir: PathBuf,
    pub recursive: bool,
}

fn is_glob_component(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

/// Derive the base directory of each pattern.
///
/// `docs/*.rst` only needs `docs` watched non-recursively; a `**` or a
/// wildcard before the last component needs a recursive watch. A pattern
/// without wildcards names one file, so its parent directory is watched.
/// Results are de-duplicated, recursive winning over non-recursive.
pub fn watch_roots(patterns: &[String]) -> Vec<WatchRoot> {
    let mut roots: BTreeMap<PathBuf, bool> = BTreeMap::new();

    for pattern in patterns {
        let components: Vec<&str> = normalize_pattern(pattern)
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();

        let literal = components
            .iter()
            .take_while(|c| !is_glob_component(c))
            .count();

        let (base, recursive) = if literal == components.len() {
            (&components[..literal.saturating_sub(1)], false)
        } else {
            let rest = &components[literal..];
            let recursive = rest.len() > 1 || rest.iter().any(|c| c.contains("**"));
            (&components[..literal], recursive)
        };

        let dir = if base.is_empty() {
            PathBuf::from(".")
        } else {
            base.iter().collect()
        };

        let entry = roots.entry(dir).or_insert(false);
        *entry |= recursive;
    }

    roots
        .into_iter()
        .map(|(dir, recursive)| WatchRoot { dir, recursive })
        .collect()
}
