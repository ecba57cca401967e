//! Basic CLI E2E tests.
//!
//! Each test points `TOMATO_HOME` at its own temporary directory so runs never
//! touch the real data directory or each other.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tomato(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tomato").expect("binary builds");
    cmd.env("TOMATO_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "command failed: {output:?}");
    String::from_utf8(output.stdout).expect("utf-8 output")
}

fn task_ids(home: &TempDir) -> Vec<u64> {
    let json = stdout_of(tomato(home).args(["task", "list", "--json"]));
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_task_lifecycle() {
    let home = TempDir::new().unwrap();

    tomato(&home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"));

    tomato(&home)
        .args(["task", "add", "write", "the", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added:"));

    let ids = task_ids(&home);
    assert_eq!(ids.len(), 1);
    let id = ids[0].to_string();

    tomato(&home)
        .args(["task", "toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    tomato(&home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"))
        .stdout(predicate::str::contains("write the report"))
        .stdout(predicate::str::contains("0 of 1 pending"));

    tomato(&home)
        .args(["task", "delete", &id])
        .assert()
        .success();
    assert!(task_ids(&home).is_empty());
}

#[test]
fn test_task_unknown_id_fails() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["task", "toggle", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found: 12345"));
}

#[test]
fn test_task_blank_text_fails() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["task", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task text is empty"));
}

#[test]
fn test_stats_start_empty() {
    let home = TempDir::new().unwrap();
    let json = stdout_of(tomato(&home).args(["stats", "show", "--json"]));
    let stats: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(stats["completedPomodoros"], 0);
    assert_eq!(stats["todayPomodoros"], 0);
    assert_eq!(stats["totalWorkTime"], 0);

    tomato(&home).args(["stats", "reset"]).assert().success();
}

#[test]
fn test_stats_malformed_record_reads_as_empty() {
    let home = TempDir::new().unwrap();
    {
        let db = tomato_core::Database::open_at(&home.path().join("tomato.db")).unwrap();
        db.kv_set("stats", "garbage").unwrap();
    }
    tomato(&home)
        .args(["stats", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed pomodoros: 0"));
}

#[test]
fn test_config_get_set_reset() {
    let home = TempDir::new().unwrap();

    tomato(&home)
        .args(["config", "get", "timer.work_minutes"])
        .assert()
        .success()
        .stdout("25\n");

    tomato(&home)
        .args(["config", "set", "timer.work_minutes", "45"])
        .assert()
        .success();
    tomato(&home)
        .args(["config", "get", "timer.work_minutes"])
        .assert()
        .success()
        .stdout("45\n");

    // Out-of-range values are clamped, not rejected.
    tomato(&home)
        .args(["config", "set", "timer.rounds_per_cycle", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timer.rounds_per_cycle = 10"));

    tomato(&home).args(["config", "reset"]).assert().success();
    tomato(&home)
        .args(["config", "get", "timer.work_minutes"])
        .assert()
        .success()
        .stdout("25\n");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["config", "get", "timer.nope"])
        .assert()
        .failure();
    tomato(&home)
        .args(["config", "set", "timer.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_timer_preview_uses_config() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["config", "set", "timer.work_minutes", "30"])
        .assert()
        .success();

    let json = stdout_of(tomato(&home).args(["timer", "preview"]));
    let snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot["type"], "state_snapshot");
    assert_eq!(snapshot["mode"], "work");
    assert_eq!(snapshot["seconds_remaining"], 1800);
    assert_eq!(snapshot["current_round"], 1);
    assert_eq!(snapshot["is_running"], false);
}

#[test]
fn test_timer_run_quits_on_command() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["config", "set", "notifications.desktop", "false"])
        .assert()
        .success();
    tomato(&home)
        .args(["timer", "run", "--mode", "short"])
        .write_stdin("pause\nquit\n")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 phase(s) completed"));
}

#[test]
fn test_timer_run_reload_applies_config() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["config", "set", "notifications.desktop", "false"])
        .assert()
        .success();
    tomato(&home)
        .args(["config", "set", "timer.work_minutes", "40"])
        .assert()
        .success();
    tomato(&home)
        .args(["timer", "run"])
        .write_stdin("reload\nquit\n")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings reloaded."))
        .stdout(predicate::str::contains("40:00 - Working  round 1/4    0%  [paused]"));
}

#[test]
fn test_quote_prints_a_line() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(tomato(&home).arg("quote"));
    assert!(tomato_core::quotes::QUOTES.contains(&out.trim()));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    tomato(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tomato"));
}
