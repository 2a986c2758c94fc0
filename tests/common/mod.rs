#![allow(dead_code)]

pub mod command;
pub mod file;

pub const HELLO_WORLD_OID: &str = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad";
pub const EMPTY_TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Trimmed stdout of a successful command
pub fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .expect("stdout is not valid UTF-8")
        .trim()
        .to_string()
}
