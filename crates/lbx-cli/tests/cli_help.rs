use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_commands_and_flags() {
    cargo_bin_cmd!("lbx")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("terminal banking client"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("lbx")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lbx"));
}

// The interactive client refuses to start without a TTY, which is
// exactly the situation under a test harness with piped stdio.
#[test]
fn test_default_command_requires_terminal() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lbx")
        .env("LBX_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
