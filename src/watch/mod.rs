// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling a task's `watch` / `exclude` glob patterns.
//! - Deriving which directories have to be watched for those patterns.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - (Optionally) dropping changes whose file content did not change.
//!
//! It does not run anything; it only turns filesystem changes into
//! `RuntimeEvent::PathsChanged`.

pub mod hash;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use hash::{compute_file_hash, ContentHashes};
pub use patterns::{compile_globset, normalize_pattern, watch_roots, WatchRoot, WatchSet};
pub use watcher::{filter_event_paths, spawn_watcher, WatcherHandle};
