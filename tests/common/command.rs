use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository holding three committed files:
/// `1.txt`, `a/2.txt` and `a/b/3.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_wit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    wit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_wit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wit").expect("Failed to find wit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn wit_commit(dir: &Path, message: &str) -> Command {
    run_wit_command(dir, &["commit", "-m", message])
}

/// Run `wit commit` and return the printed commit id.
///
/// Commit output has the shape `[<id>] <message>`.
pub fn wit_commit_id(dir: &Path, message: &str) -> String {
    let output = wit_commit(dir, message)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("commit output is not utf-8");

    stdout
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.split(']').next())
        .expect("commit output does not start with an id")
        .to_string()
}

pub fn wit_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_wit_command(dir, args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("command output is not utf-8")
}

pub fn read_metadata(dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join(".wit").join("metadata.json"))
        .expect("Failed to read metadata");

    serde_json::from_str(&raw).expect("Failed to parse metadata")
}
