//! Integration tests for the ironlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan generation, preview and persistence
//! - Today's workout with progressive overload
//! - Exercise logging with per-set detail
//! - CSV rollup and history after archiving

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ironlog"))
}

/// CLI isolated to `data_dir`, including its config file
///
/// The config path may not exist, in which case defaults apply.
fn cli_in(data_dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(data_dir.join("config.toml"));
    cmd
}

fn generate_plan(data_dir: &Path, days: &str) {
    cli_in(data_dir)
        .args(["plan", "generate", "--goal", "strength", "--level", "beginner"])
        .args(["--days", days])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan saved"));
}

fn log_exercise(data_dir: &Path, args: &[&str]) {
    cli_in(data_dir)
        .arg("log")
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged"));
}

fn today_json(data_dir: &Path, day: &str) -> Value {
    let output = cli_in(data_dir)
        .args(["today", "--day", day, "--json"])
        .output()
        .expect("Failed to run today");
    assert!(output.status.success(), "today failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("today output is not JSON")
}

fn suggested_weight(today: &Value, exercise: &str) -> f64 {
    today["exercises"]
        .as_array()
        .expect("exercises array")
        .iter()
        .find(|e| e["name"] == exercise)
        .unwrap_or_else(|| panic!("{} not in today's workout", exercise))["suggested_weight"]
        .as_f64()
        .expect("numeric weight")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Weekly workout planner with progressive overload",
        ));
}

#[test]
fn test_preview_does_not_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli_in(data_dir)
        .args(["plan", "generate", "--goal", "fat-loss", "--level", "beginner"])
        .args(["--days", "3", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FULL BODY PLAN"))
        .stdout(predicate::str::contains("Preview"));

    assert!(!data_dir.join("plan.json").exists());
}

#[test]
fn test_generate_then_show() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    generate_plan(data_dir, "4");
    assert!(data_dir.join("plan.json").exists());

    let output = cli_in(data_dir)
        .args(["plan", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stored: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stored["plan"]["split_type"], "upper_lower");
    assert_eq!(
        stored["plan"]["description"],
        "A 4-day Upper/Lower routine focused on Strength."
    );
    assert_eq!(stored["plan"]["schedule"]["Monday"]["focus_label"], "Upper Power");
    assert!(stored["plan"]["schedule"]["Wednesday"].is_null());
}

#[test]
fn test_invalid_days_rejected() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["plan", "generate", "--goal", "strength", "--level", "beginner"])
        .args(["--days", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days_per_week must be between 1 and 7"));

    assert!(!temp_dir.path().join("plan.json").exists());
}

#[test]
fn test_unknown_goal_rejected() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["plan", "generate", "--goal", "bulking", "--level", "beginner"])
        .args(["--days", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown goal"));
}

#[test]
fn test_custom_schedule_json() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args(["plan", "generate", "--goal", "muscle-gain", "--level", "advanced"])
        .args(["--custom", "Day 1=Chest"])
        .args(["--custom", "Day 2=Rest"])
        .args(["--custom", "Day 3=Pilates"])
        .args(["--preview", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "generate failed: {:?}", output);

    let plan: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["split_type"], "custom");
    assert_eq!(plan["schedule"]["Monday"]["focus_label"], "Chest");
    assert_eq!(plan["schedule"]["Tuesday"]["is_rest_day"], true);
    assert_eq!(plan["schedule"]["Wednesday"]["focus_label"], "Pilates");
    assert_eq!(plan["schedule"]["Wednesday"]["is_rest_day"], false);
    assert_eq!(
        plan["schedule"]["Wednesday"]["exercises"]
            .as_array()
            .unwrap()
            .len(),
        0
    );
}

#[test]
fn test_custom_schedule_length_mismatch() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["plan", "generate", "--goal", "strength", "--level", "beginner"])
        .args(["--days", "3", "--custom", "Day 1=Chest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom schedule has 1 entries"));
}

#[test]
fn test_today_without_plan() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["today", "--day", "monday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No workout plan found"));
}

#[test]
fn test_today_rest_day() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    generate_plan(data_dir, "3");

    cli_in(data_dir)
        .args(["today", "--day", "sunday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest Day! Enjoy your recovery."));

    let today = today_json(data_dir, "tuesday");
    assert_eq!(today["is_rest_day"], true);
    assert_eq!(today["exercises"].as_array().unwrap().len(), 0);
}

#[test]
fn test_overload_after_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    generate_plan(data_dir, "4");

    // No history: catalog baseline
    let today = today_json(data_dir, "monday");
    assert_eq!(today["focus_label"], "Upper Power");
    assert_eq!(suggested_weight(&today, "Bench Press"), 45.0);

    log_exercise(
        data_dir,
        &["--exercise", "Bench Press", "--sets", "4", "--reps", "5", "--weight", "50"],
    );
    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 52.5);

    // A missed session holds the weight
    log_exercise(
        data_dir,
        &["--exercise", "Bench Press", "--weight", "52.5", "--missed"],
    );
    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 52.5);
}

#[test]
fn test_log_with_set_detail_uses_heaviest_set() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    generate_plan(data_dir, "4");
    log_exercise(
        data_dir,
        &[
            "--exercise",
            "Bench Press",
            "--set",
            "40x10",
            "--set",
            "42.5x8",
            "--set",
            "45x6:missed",
        ],
    );

    let log = fs::read_to_string(data_dir.join("log/workout_log.jsonl")).unwrap();
    let entry: Value = serde_json::from_str(log.lines().next().unwrap()).unwrap();
    assert_eq!(entry["weight_performed"], 45.0);
    assert_eq!(entry["sets_performed"], 3);
    assert_eq!(entry["reps_summary"], "10/8/6");
    assert_eq!(entry["set_detail"][2]["completed"], false);

    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 47.5);
}

#[test]
fn test_log_rejects_bad_set() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["log", "--exercise", "Squats", "--set", "heavy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WEIGHTxREPS"));

    assert!(!temp_dir.path().join("log/workout_log.jsonl").exists());
}

#[test]
fn test_history_is_scoped_per_user() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    generate_plan(data_dir, "4");
    log_exercise(
        data_dir,
        &["--exercise", "Bench Press", "--weight", "80", "--user", "someone-else"],
    );

    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 45.0);
}

#[test]
fn test_rollup_keeps_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli_in(data_dir)
        .arg("rollup")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to roll up"));

    generate_plan(data_dir, "4");
    log_exercise(data_dir, &["--exercise", "Bench Press", "--weight", "60"]);
    log_exercise(data_dir, &["--exercise", "Squats", "--weight", "100"]);

    cli_in(data_dir)
        .args(["rollup", "--cleanup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled up 2 log entries"))
        .stdout(predicate::str::contains("Cleaned up 1 processed log files"));

    assert!(data_dir.join("workout_log.csv").exists());
    assert!(!data_dir.join("log/workout_log.jsonl").exists());

    // Archived entries still drive suggestions
    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 62.5);
}

#[test]
fn test_config_increment_flows_to_today() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(
        data_dir.join("config.toml"),
        "[progression]\nincrement_kg = 5.0\n",
    )
    .unwrap();

    generate_plan(data_dir, "4");
    log_exercise(data_dir, &["--exercise", "Bench Press", "--weight", "50"]);

    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 55.0);
}

#[test]
fn test_log_rejects_unstorable_weights() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for args in [
        vec!["--weight", "nan"],
        vec!["--weight", "inf"],
        vec!["--weight=-5"],
        vec!["--set", "nanx5"],
        vec!["--set", "40x10", "--set=-5x5"],
    ] {
        cli_in(data_dir)
            .args(["log", "--exercise", "Bench Press"])
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("finite, non-negative"));
    }

    assert!(!data_dir.join("log/workout_log.jsonl").exists());
}

#[test]
fn test_empty_user_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    generate_plan(data_dir, "4");

    cli_in(data_dir)
        .args(["log", "--exercise", "Bench Press", "--weight", "50", "--user", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user must not be empty"));

    cli_in(data_dir)
        .args(["today", "--day", "monday", "--user", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user must not be empty"));

    assert!(!data_dir.join("log/workout_log.jsonl").exists());
}

#[test]
fn test_log_session_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let session = data_dir.join("session.json");
    fs::write(
        &session,
        r#"[
            {"name": "Bench Press", "sets": 4, "reps": "5", "weight": 50.0, "completed": true},
            {"name": "Squats", "sets": 2, "reps": "5", "weight": 0.0, "completed": false,
             "set_detail": [
                {"set_number": 1, "weight": 95.0, "reps": 5, "completed": true},
                {"set_number": 2, "weight": 100.0, "reps": 3, "completed": false}
             ]}
        ]"#,
    )
    .unwrap();

    generate_plan(data_dir, "4");

    cli_in(data_dir)
        .arg("log")
        .arg("--session")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Bench Press"))
        .stdout(predicate::str::contains("Logged Squats"));

    let log = fs::read_to_string(data_dir.join("log/workout_log.jsonl")).unwrap();
    let entries: Vec<Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["exercise_name"], "Squats");
    assert_eq!(entries[1]["weight_performed"], 100.0);
    assert_eq!(entries[1]["completed"], false);

    let today = today_json(data_dir, "monday");
    assert_eq!(suggested_weight(&today, "Bench Press"), 52.5);
}

#[test]
fn test_log_session_is_all_or_nothing() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let session = data_dir.join("session.json");
    fs::write(
        &session,
        r#"[
            {"name": "Bench Press", "sets": 4, "reps": "5", "weight": 50.0, "completed": true},
            {"name": "Squats", "sets": 3, "reps": "5", "weight": -10.0, "completed": true}
        ]"#,
    )
    .unwrap();

    cli_in(data_dir)
        .arg("log")
        .arg("--session")
        .arg(&session)
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite, non-negative"));

    assert!(!data_dir.join("log/workout_log.jsonl").exists());

    cli_in(data_dir)
        .args(["log", "--exercise", "Squats", "--weight", "60", "--session"])
        .arg(&session)
        .assert()
        .failure();
}
