use std::error::Error;
use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;

use doctask::engine::RuntimeEvent;
use doctask::errors::DoctaskError;
use doctask::tasks::TaskTable;
use doctask::watch::{spawn_watcher, WatchSet};
use doctask_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn docs_watch() -> Result<WatchSet, Box<dyn Error>> {
    let table = TaskTable::builtin();
    Ok(WatchSet::compile(table.get("default")?)?)
}

/// Wait until a `PathsChanged` containing `path` arrives.
async fn wait_for_path(rx: &mut mpsc::Receiver<RuntimeEvent>, path: &str) -> bool {
    let wait = async {
        while let Some(event) = rx.recv().await {
            if let RuntimeEvent::PathsChanged { paths } = event {
                if paths.iter().any(|p| p == path) {
                    return true;
                }
            }
        }
        false
    };
    timeout(Duration::from_secs(5), wait).await.unwrap_or(false)
}

#[tokio::test]
async fn writing_a_docs_source_reaches_the_runtime() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    fs::create_dir_all(dir.path().join("docs"))?;

    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn_watcher(dir.path(), docs_watch()?, tx, false)?;

    // Give the backend a moment to register before producing events.
    tokio::time::sleep(Duration::from_millis(100)).await;
    fs::write(dir.path().join("docs/index.rst"), "Title\n=====\n")?;

    assert!(wait_for_path(&mut rx, "docs/index.rst").await);

    Ok(())
}

#[tokio::test]
async fn unrelated_files_are_not_forwarded() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    fs::create_dir_all(dir.path().join("docs"))?;

    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn_watcher(dir.path(), docs_watch()?, tx, false)?;

    tokio::time::sleep(Duration::from_millis(100)).await;
    fs::write(dir.path().join("docs/notes.txt"), "scratch")?;

    let got = timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(got.is_err(), "unexpected event: {got:?}");

    Ok(())
}

#[tokio::test]
async fn missing_docs_directory_is_a_watch_error() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let (tx, _rx) = mpsc::channel(16);

    let result = spawn_watcher(dir.path(), docs_watch()?, tx, false);
    assert!(matches!(result, Err(DoctaskError::Watch(_))));

    Ok(())
}
