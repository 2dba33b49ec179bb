use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn fubon(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fubon").unwrap();
    cmd.env("HOME", home.path())
        .env("FUBON_GATEWAY_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn scenario_orders_without_session_fail_with_envelope() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .args(["stock", "orders"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn scenario_login_missing_options() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .args(["login", "--id", "A123456789"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing required options"));
    assert!(!home.path().join(".fubon-cli-session.json").exists());
}

#[test]
fn scenario_status_without_session() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .args(["login", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"logged_in\": false"));
}

#[test]
fn scenario_bad_choice_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .args(["stock", "buy", "2330", "1000", "--price-type", "cheap"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cheap"));
}

#[test]
fn scenario_config_round_trip() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .args(["config", "set", "openai-key", "sk-0123456789abcdef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-01234..."))
        .stdout(predicate::str::contains("0123456789abcdef").not());
    fubon(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("openai_api_key"));
}

#[test]
fn scenario_unknown_config_key() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Valid keys"));
}

#[test]
fn scenario_ask_without_key() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .env_remove("OPENAI_API_KEY")
        .env_remove("FUBON_AI_KEY")
        .args(["ask", "what is my balance?", "--json-output"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("AI API key not set"));
}

#[test]
fn scenario_bare_command_prints_welcome() {
    let home = tempfile::tempdir().unwrap();
    fubon(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Command groups:"));
}
