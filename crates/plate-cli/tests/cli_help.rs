use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("plate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_profile_help_shows_json_flag() {
    cargo_bin_cmd!("plate")
        .args(["profile", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_login_requires_email() {
    cargo_bin_cmd!("plate")
        .args(["login", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("plate")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
