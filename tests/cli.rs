use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/profile.json");

fn xpdash() -> Command {
    let mut cmd = Command::cargo_bin("xpdash").unwrap();
    cmd.env_remove("XPDASH_TOKEN").env_remove("XPDASH_ENDPOINT");
    cmd
}

#[test]
fn cli_shows_help() {
    xpdash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("xpdash"));
}

#[test]
fn render_from_saved_profile() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("dash.html");
    let csv = dir.path().join("xp.csv");
    let charts = dir.path().join("charts.svg");
    xpdash()
        .args(["--token-file"])
        .arg(dir.path().join("token"))
        .args(["render", "--input", FIXTURE, "--out"])
        .arg(&out)
        .arg("--csv")
        .arg(&csv)
        .arg("--charts")
        .arg(&charts)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote dashboard"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("User: jdoe"));
    assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 4);
    assert!(charts.exists());
}

#[test]
fn exclude_pattern_is_validated() {
    let dir = tempdir().unwrap();
    xpdash()
        .arg("--token-file")
        .arg(dir.path().join("token"))
        .args(["--exclude", "piscine-(", "render", "--input", FIXTURE, "--out"])
        .arg(dir.path().join("x.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid exclude pattern"));
}

#[test]
fn login_and_logout_manage_the_token_file() {
    let dir = tempdir().unwrap();
    let token = dir.path().join("cfg").join("token");

    xpdash()
        .arg("--token-file")
        .arg(&token)
        .args(["login", "aaa.bbb.ccc"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&token).unwrap(), "aaa.bbb.ccc");

    xpdash()
        .arg("--token-file")
        .arg(&token)
        .arg("logout")
        .assert()
        .success();
    assert!(!token.exists());
}

#[test]
fn show_without_token_asks_for_login() {
    let dir = tempdir().unwrap();
    xpdash()
        .arg("--token-file")
        .arg(dir.path().join("token"))
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}
