use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("ladle")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("recipes"));
}

#[test]
fn test_recipes_help_shows_subcommands() {
    cargo_bin_cmd!("ladle")
        .args(["recipes", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_create_help_shows_difficulty_flag() {
    cargo_bin_cmd!("ladle")
        .args(["recipes", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--difficulty"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("ladle")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
