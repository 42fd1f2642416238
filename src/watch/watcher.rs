// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::watch::hash::ContentHashes;
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::WatchSet;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Register one watch covering the task's patterns and forward qualifying
/// changes to the runtime as `RuntimeEvent::PathsChanged`.
///
/// - `root` is the project root the patterns are relative to.
/// - `use_hash` drops changes whose file content hash did not change.
///
/// Fails if a pattern's base directory cannot be watched (e.g. it does not
/// exist).
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    watch_set: WatchSet,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    use_hash: bool,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or(root);

    let mut hashes = if use_hash {
        let mut hashes = ContentHashes::new();
        hashes.seed(&root, &watch_set)?;
        Some(hashes)
    } else {
        None
    };

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // The forwarding task is gone; tracing may already be torn down.
                    eprintln!("doctask: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("doctask: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    for watch_root in watch_set.roots() {
        let dir = root.join(&watch_root.dir);
        let mode = if watch_root.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(&dir, mode)?;
        debug!(dir = ?dir, recursive = watch_root.recursive, "watching directory");
    }

    info!(
        task = %watch_set.task(),
        patterns = ?watch_set.patterns(),
        "file watcher started on {:?}",
        root
    );

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            let paths = filter_event_paths(&root, &event, &watch_set, hashes.as_mut());
            if paths.is_empty() {
                continue;
            }

            if let Err(err) = runtime_tx.send(RuntimeEvent::PathsChanged { paths }).await {
                warn!("failed to send RuntimeEvent::PathsChanged: {err}");
                // Runtime is gone; nothing left to notify.
                return;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Reduce a notify event to the root-relative paths that qualify for the
/// watch set.
///
/// Access events never qualify. With `hashes`, paths whose content is
/// unchanged are dropped.
pub fn filter_event_paths(
    root: &Path,
    event: &Event,
    watch_set: &WatchSet,
    mut hashes: Option<&mut ContentHashes>,
) -> Vec<String> {
    if matches!(event.kind, EventKind::Access(_)) {
        return Vec::new();
    }

    let mut paths = Vec::new();
    for path in event.paths.iter() {
        let Some(rel) = relative_str(root, path) else {
            warn!("could not relativize path {:?} against root {:?}", path, root);
            continue;
        };

        if !watch_set.matches(&rel) {
            continue;
        }

        if let Some(hashes) = hashes.as_deref_mut() {
            if !hashes.has_changed(root, &rel) {
                debug!(path = %rel, "content unchanged; ignoring event");
                continue;
            }
        }

        if !paths.contains(&rel) {
            paths.push(rel);
        }
    }
    paths
}
