//! End-to-end tests for the tasker binary.
//!
//! Every test runs against its own data directory through `TASKER_HOME`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tasker(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tasker").unwrap();
    cmd.env("TASKER_HOME", home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn parse_reports_title_due_and_priority() {
    let home = TempDir::new().unwrap();
    let value = json_stdout(tasker(&home).args([
        "parse",
        "Buy milk tomorrow at 5pm!",
        "--now",
        "2024-03-11 08:00",
        "-o",
        "json",
    ]));

    assert_eq!(value["title"], "Buy milk");
    assert_eq!(value["due"], "2024-03-12T17:00:00");
    assert_eq!(value["priority"], true);
}

#[test]
fn parse_does_not_create_a_database() {
    let home = TempDir::new().unwrap();
    tasker(&home)
        .args(["parse", "call mom 22nd of november", "--now", "2024-03-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("call mom"))
        .stdout(predicate::str::contains("2024-11-22 00:00"));

    assert!(!home.path().join("tasker.db").exists());
}

#[test]
fn parse_rejects_bad_reference_instant() {
    let home = TempDir::new().unwrap();
    tasker(&home)
        .args(["parse", "Buy milk", "--now", "yesterday-ish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn add_then_list_tasks() {
    let home = TempDir::new().unwrap();
    tasker(&home)
        .args(["add", "urgent renew passport in 2 months", "--now", "2024-03-11 08:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"))
        .stdout(predicate::str::contains("renew passport"));

    let value = json_stdout(tasker(&home).args(["tasks", "--list", "Inbox", "-o", "json"]));
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["title"], "renew passport");
    assert_eq!(value["items"][0]["priority"], true);
    assert!(value["items"][0]["dueDate"].is_i64());
}

#[test]
fn config_default_list_is_used() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_list: Errands\n  default_output: json\n",
    )
    .unwrap();

    let value = json_stdout(tasker(&home).args(["add", "Pick up dry cleaning"]));
    assert_eq!(value["list"], "Errands");
    assert_eq!(value["task"]["title"], "Pick up dry cleaning");
}

#[test]
fn done_edit_move_and_remove() {
    let home = TempDir::new().unwrap();
    for text in ["first", "second", "third"] {
        tasker(&home).args(["add", text]).assert().success();
    }

    let listed = json_stdout(tasker(&home).args(["tasks", "-o", "json"]));
    let third = listed["items"][2]["id"].as_i64().unwrap();

    tasker(&home)
        .args(["done", &third.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));

    let edited = json_stdout(tasker(&home).args([
        "edit",
        &third.to_string(),
        "--title",
        "THIRD",
        "--priority",
        "true",
        "-o",
        "json",
    ]));
    assert_eq!(edited["title"], "THIRD");
    assert_eq!(edited["completed"], true);

    tasker(&home)
        .args(["move", &third.to_string(), "--position", "0"])
        .assert()
        .success();
    let listed = json_stdout(tasker(&home).args(["tasks", "-o", "json"]));
    assert_eq!(listed["items"][0]["title"], "THIRD");

    let open = json_stdout(tasker(&home).args(["tasks", "--open", "-o", "json"]));
    assert_eq!(open["count"], 2);

    tasker(&home)
        .args(["rm", &third.to_string()])
        .assert()
        .success();
    let listed = json_stdout(tasker(&home).args(["tasks", "-o", "json"]));
    assert_eq!(listed["count"], 2);
}

#[test]
fn lists_and_groups() {
    let home = TempDir::new().unwrap();
    tasker(&home).args(["groups", "add", "Work"]).assert().success();
    tasker(&home)
        .args(["lists", "add", "Reports", "--group", "Work"])
        .assert()
        .success();

    tasker(&home)
        .args(["lists", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reports"))
        .stdout(predicate::str::contains("Work"));

    let groups = json_stdout(tasker(&home).args(["groups", "ls", "-o", "json"]));
    assert_eq!(groups["count"], 1);
}

#[test]
fn export_import_round_trip() {
    let source = TempDir::new().unwrap();
    tasker(&source)
        .args(["add", "Pay invoice 3/25", "--list", "Bills"])
        .assert()
        .success();

    let backup = source.path().join("backup.json");
    tasker(&source)
        .args(["export", "--file", backup.to_str().unwrap()])
        .assert()
        .success();

    let target = TempDir::new().unwrap();
    tasker(&target)
        .args(["import", backup.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 task(s)"));

    let value = json_stdout(tasker(&target).args(["tasks", "--list", "bills", "-o", "json"]));
    assert_eq!(value["items"][0]["title"], "Pay invoice");
}

#[test]
fn clear_requires_yes() {
    let home = TempDir::new().unwrap();
    tasker(&home).args(["add", "keep me"]).assert().success();

    tasker(&home).arg("clear").assert().failure();
    tasker(&home).args(["clear", "--yes"]).assert().success();

    let value = json_stdout(tasker(&home).args(["tasks", "-o", "json"]));
    assert_eq!(value["count"], 0);
}

#[test]
fn missing_task_exits_with_error() {
    let home = TempDir::new().unwrap();
    tasker(&home)
        .args(["done", "999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    tasker(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tasker"));
}
