use assert_cmd::Command;
use predicates::prelude::predicate;

mod common;

use common::command::{read_metadata, run_wit_command};

#[test]
fn init_creates_control_directory_and_initial_metadata()
-> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();
    let mut sut = Command::cargo_bin("wit")?;

    sut.arg("init").arg(dir.path());

    sut.assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty wit repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    assert!(dir.path().join(".wit").is_dir());
    assert!(dir.path().join(".wit").join("staging").is_dir());
    assert!(dir.path().join(".wit").join("images").is_dir());
    assert!(dir.path().join(".wit").join("manifests").is_dir());

    let metadata = read_metadata(dir.path());
    assert_eq!(metadata["last_commit"], serde_json::Value::Null);
    assert_eq!(metadata["version"], "1.0");

    Ok(())
}

#[test]
fn reinitializing_an_existing_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;

    run_wit_command(dir.path(), &["init"]).assert().success();

    run_wit_command(dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    // the metadata record survived the failed attempt untouched
    let metadata = read_metadata(dir.path());
    assert_eq!(metadata["last_commit"], serde_json::Value::Null);

    Ok(())
}

#[test]
fn operations_before_init_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;

    for args in [
        vec!["status"],
        vec!["add", "."],
        vec!["commit", "-m", "message"],
        vec!["checkout", "deadbeef", "--force"],
    ] {
        run_wit_command(dir.path(), &args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a wit repository"));
    }

    Ok(())
}
