use std::error::Error;
use std::fs;

use notify::event::{AccessKind, CreateKind, ModifyKind};
use notify::{Event, EventKind};
use tempfile::TempDir;

use doctask::tasks::TaskTable;
use doctask::watch::{compute_file_hash, filter_event_paths, ContentHashes, WatchSet};

type TestResult = Result<(), Box<dyn Error>>;

fn docs_project() -> Result<TempDir, Box<dyn Error>> {
    let dir = TempDir::new()?;
    fs::create_dir_all(dir.path().join("docs/_build"))?;
    fs::write(dir.path().join("docs/index.rst"), "Welcome\n=======\n")?;
    fs::write(dir.path().join("docs/conf.py"), "project = 'demo'\n")?;
    fs::write(dir.path().join("docs/_build/index.html"), "<html></html>")?;
    Ok(dir)
}

fn docs_watch() -> Result<WatchSet, Box<dyn Error>> {
    let table = TaskTable::builtin();
    Ok(WatchSet::compile(table.get("default")?)?)
}

#[test]
fn hash_is_blake3_of_the_content() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("test.txt");
    fs::write(&path, b"hello world")?;

    assert_eq!(
        compute_file_hash(&path)?,
        "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
    );

    Ok(())
}

#[test]
fn seeding_records_only_watched_files() -> TestResult {
    let dir = docs_project()?;
    let mut hashes = ContentHashes::new();
    assert!(hashes.is_empty());

    hashes.seed(dir.path(), &docs_watch()?)?;

    assert_eq!(hashes.len(), 2);
    assert!(!hashes.has_changed(dir.path(), "docs/index.rst"));
    assert!(!hashes.has_changed(dir.path(), "docs/conf.py"));

    Ok(())
}

#[test]
fn rewriting_identical_content_is_not_a_change() -> TestResult {
    let dir = docs_project()?;
    let mut hashes = ContentHashes::new();
    hashes.seed(dir.path(), &docs_watch()?)?;

    fs::write(dir.path().join("docs/index.rst"), "Welcome\n=======\n")?;
    assert!(!hashes.has_changed(dir.path(), "docs/index.rst"));

    fs::write(dir.path().join("docs/index.rst"), "Welcome!\n========\n")?;
    assert!(hashes.has_changed(dir.path(), "docs/index.rst"));
    assert!(!hashes.has_changed(dir.path(), "docs/index.rst"));

    Ok(())
}

#[test]
fn removed_and_new_files_count_as_changes() -> TestResult {
    let dir = docs_project()?;
    let mut hashes = ContentHashes::new();
    hashes.seed(dir.path(), &docs_watch()?)?;

    fs::remove_file(dir.path().join("docs/conf.py"))?;
    assert!(hashes.has_changed(dir.path(), "docs/conf.py"));

    fs::write(dir.path().join("docs/usage.rst"), "Usage\n")?;
    assert!(hashes.has_changed(dir.path(), "docs/usage.rst"));

    Ok(())
}

#[test]
fn event_filter_keeps_only_qualifying_paths() -> TestResult {
    let dir = docs_project()?;
    let root = dir.path();
    let watch = docs_watch()?;

    let event = Event::new(EventKind::Modify(ModifyKind::Any))
        .add_path(root.join("docs/index.rst"))
        .add_path(root.join("docs/_build/index.html"))
        .add_path(root.join("docs/index.rst"));
    assert_eq!(
        filter_event_paths(root, &event, &watch, None),
        vec!["docs/index.rst".to_string()]
    );

    let access = Event::new(EventKind::Access(AccessKind::Any)).add_path(root.join("docs/conf.py"));
    assert!(filter_event_paths(root, &access, &watch, None).is_empty());

    let outside = Event::new(EventKind::Create(CreateKind::File)).add_path("/elsewhere/docs/conf.py".into());
    assert!(filter_event_paths(root, &outside, &watch, None).is_empty());

    Ok(())
}

#[test]
fn event_filter_drops_unchanged_content_when_hashing() -> TestResult {
    let dir = docs_project()?;
    let root = dir.path();
    let watch = docs_watch()?;
    let mut hashes = ContentHashes::new();
    hashes.seed(root, &watch)?;

    let touch = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(root.join("docs/index.rst"));
    assert!(filter_event_paths(root, &touch, &watch, Some(&mut hashes)).is_empty());

    fs::write(root.join("docs/index.rst"), "Changed\n")?;
    assert_eq!(
        filter_event_paths(root, &touch, &watch, Some(&mut hashes)),
        vec!["docs/index.rst".to_string()]
    );

    Ok(())
}
