use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "Fake User";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000"; // %Y-%m-%d %H:%M:%S %z

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("main.go"),
        "package main\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("src").join("util.go"),
        "package src\n".to_string(),
    ));

    repository_dir
}

pub fn run_cairn_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("cairn").expect("Failed to find cairn binary");
    cmd.envs(vec![
        ("NO_COLOR", "1"),
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd.env_remove("CAIRN_WORK_TREE");
    cmd.env_remove("CAIRN_DIR");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn cairn_commit(dir: &Path, message: &str) -> Command {
    run_cairn_command(dir, &["commit-tree", "-m", message])
}
