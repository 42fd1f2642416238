// src/watch/hash.rs

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

use crate::watch::path_utils::relative_str;
use crate::watch::patterns::WatchSet;

/// Compute the blake3 hash of a single file.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file =
        File::open(path).with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Last seen content hash per root-relative path, kept in memory.
///
/// Editors often touch or rewrite a file without changing it; with hashing
/// on, those events are dropped.
#[derive(Debug, Default)]
pub struct ContentHashes {
    hashes: HashMap<String, String>,
}

impl ContentHashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current hash of every existing file the watch set matches.
    pub fn seed(&mut self, root: &Path, watch_set: &WatchSet) -> Result<()> {
        for watch_root in watch_set.roots() {
            let dir = root.join(&watch_root.dir);
            if !dir.is_dir() {
                continue;
            }
            for path in list_files(&dir, watch_root.recursive)? {
                let Some(rel) = relative_str(root, &path) else {
                    continue;
                };
                if watch_set.matches(&rel) {
                    let hash = compute_file_hash(&path)?;
                    self.hashes.insert(rel, hash);
                }
            }
        }
        debug!(files = self.hashes.len(), "seeded content hashes");
        Ok(())
    }

    /// Returns true if the file's content differs from the last recorded
    /// hash, and records the new one.
    ///
    /// A file that cannot be read (typically removed) always counts as
    /// changed.
    pub fn has_changed(&mut self, root: &Path, rel_path: &str) -> bool {
        match compute_file_hash(&root.join(rel_path)) {
            Ok(hash) => {
                let changed = self.hashes.get(rel_path) != Some(&hash);
                self.hashes.insert(rel_path.to_string(), hash);
                debug!(path = %rel_path, changed, "content hash compared");
                changed
            }
            Err(err) => {
                debug!(path = %rel_path, error = %err, "file unreadable; treating as changed");
                self.hashes.remove(rel_path);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

fn list_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else if recursive && path.is_dir() {
            files.extend(list_files(&path, true)?);
        }
    }
    Ok(files)
}
