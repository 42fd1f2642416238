use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use doctask::load_task_table_from;

type TestResult = Result<(), Box<dyn Error>>;

fn write_task_file(path: &Path, cmd: &str) -> TestResult {
    fs::write(
        path,
        format!(
            r#"
[task.build-docs]
cmd = "{cmd}"
"#
        ),
    )?;
    Ok(())
}

fn build_docs_cmd(table: &doctask::tasks::TaskTable) -> Result<Vec<String>, Box<dyn Error>> {
    Ok(table.get("build-docs")?.cmd.clone())
}

#[test]
fn builtin_table_is_used_without_a_task_file() -> TestResult {
    let dir = TempDir::new()?;

    let (table, root) = load_task_table_from(None, dir.path())?;

    assert_eq!(build_docs_cmd(&table)?, vec!["make -C docs html".to_string()]);
    assert!(table.get("default")?.is_watching());
    assert_eq!(root, dir.path());

    Ok(())
}

#[test]
fn task_file_in_working_directory_replaces_builtin() -> TestResult {
    let dir = TempDir::new()?;
    write_task_file(&dir.path().join("Doctask.toml"), "make -C docs singlehtml")?;

    let (table, root) = load_task_table_from(None, dir.path())?;

    assert_eq!(build_docs_cmd(&table)?, vec!["make -C docs singlehtml".to_string()]);
    assert!(table.get("default").is_err());
    assert_eq!(root, dir.path());

    Ok(())
}

#[test]
fn explicit_task_file_wins_and_sets_root_to_its_directory() -> TestResult {
    let dir = TempDir::new()?;
    write_task_file(&dir.path().join("Doctask.toml"), "make -C docs singlehtml")?;
    fs::create_dir(dir.path().join("ci"))?;
    write_task_file(&dir.path().join("ci/docs.toml"), "make -C docs latexpdf")?;

    let (table, root) = load_task_table_from(Some(Path::new("ci/docs.toml")), dir.path())?;

    assert_eq!(build_docs_cmd(&table)?, vec!["make -C docs latexpdf".to_string()]);
    assert_eq!(root, dir.path().join("ci"));

    Ok(())
}

#[test]
fn configured_root_is_relative_to_the_task_file() -> TestResult {
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join("ci"))?;
    fs::write(
        dir.path().join("ci/docs.toml"),
        r#"
[config]
root = ".."

[task.build-docs]
cmd = "make -C docs html"
"#,
    )?;

    let (_, root) = load_task_table_from(Some(Path::new("ci/docs.toml")), dir.path())?;

    assert_eq!(root.canonicalize()?, dir.path().canonicalize()?);

    Ok(())
}

#[test]
fn demo_task_file_runs_in_the_project_root() -> TestResult {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let (table, root) = load_task_table_from(Some(Path::new("demos/Doctask.toml")), &manifest)?;

    assert_eq!(root.canonicalize()?, manifest.canonicalize()?);
    assert!(root.join("demos/Doctask.toml").is_file());
    assert!(table.get("publish").is_ok());

    Ok(())
}

#[test]
fn missing_explicit_task_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");

    let result = load_task_table_from(Some(Path::new("nope.toml")), dir.path());

    assert!(result.is_err());
}
