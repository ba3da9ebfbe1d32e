//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn proctor() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("proctor").unwrap()
}

#[test]
fn plan_prints_json_and_summary() {
    proctor()
        .arg("plan")
        .arg("--seed")
        .arg("cli-battery")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seed\": \"cli-battery\""))
        .stdout(predicate::str::contains("\"code\": \"A\""))
        .stdout(predicate::str::contains("\"code\": \"F\""))
        .stderr(predicate::str::contains("Arithmetic Reliability"));
}

#[test]
fn plan_is_deterministic_per_seed() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "stable-seed", "--output"])
        .arg(&first)
        .assert()
        .success();
    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "stable-seed", "--output"])
        .arg(&second)
        .assert()
        .success();

    let a = std::fs::read_to_string(&first).unwrap();
    let b = std::fs::read_to_string(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn plan_respects_section_filter() {
    proctor()
        .args(["plan", "--seed", "subset", "--sections", "c,A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"A\""))
        .stdout(predicate::str::contains("\"code\": \"C\""))
        .stdout(predicate::str::contains("\"code\": \"B\"").not());
}

#[test]
fn plan_rejects_unknown_section_code() {
    proctor()
        .args(["plan", "--seed", "bad", "--sections", "A,Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section code: Z"));
}

#[test]
fn grade_empty_submission_scores_zero() {
    let dir = TempDir::new().unwrap();
    let plan_path = dir.path().join("plan.json");
    let submission_path = dir.path().join("submission.json");
    std::fs::write(&submission_path, "{\"sections\": []}").unwrap();

    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "graded", "--output"])
        .arg(&plan_path)
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .args(["grade", "--plan"])
        .arg(&plan_path)
        .arg("--responses")
        .arg(&submission_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 0.0%"));
}

#[test]
fn grade_emits_json_report_with_seed() {
    let dir = TempDir::new().unwrap();
    let plan_path = dir.path().join("plan.json");
    let submission_path = dir.path().join("submission.json");
    let report_path = dir.path().join("report.json");
    std::fs::write(&submission_path, "{}").unwrap();

    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "report-seed", "--output"])
        .arg(&plan_path)
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .args(["grade", "--format", "json", "--plan"])
        .arg(&plan_path)
        .arg("--responses")
        .arg(&submission_path)
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seed\": \"report-seed\""));

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("\"overall\": 0.0"));
    assert!(report.contains("\"createdAt\""));
}

#[test]
fn grade_markdown_format() {
    let dir = TempDir::new().unwrap();
    let plan_path = dir.path().join("plan.json");
    let submission_path = dir.path().join("submission.json");
    std::fs::write(&submission_path, "{}").unwrap();

    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "md-seed", "--sections", "B", "--output"])
        .arg(&plan_path)
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .args(["grade", "--format", "markdown", "--plan"])
        .arg(&plan_path)
        .arg("--responses")
        .arg(&submission_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Grade Report"))
        .stdout(predicate::str::contains("## Section B"));
}

#[test]
fn grade_missing_plan_fails() {
    proctor()
        .args([
            "grade",
            "--plan",
            "nonexistent-plan.json",
            "--responses",
            "nonexistent-submission.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("nonexistent-plan.json"));
}

#[test]
fn inspect_summarizes_plan() {
    let dir = TempDir::new().unwrap();
    let plan_path = dir.path().join("plan.json");

    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "inspect-seed", "--output"])
        .arg(&plan_path)
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .args(["inspect", "--plan"])
        .arg(&plan_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: inspect-seed"))
        .stdout(predicate::str::contains("hsl("))
        .stdout(predicate::str::contains("6 sections"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created proctor.toml"));

    assert!(dir.path().join("proctor.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    proctor().current_dir(dir.path()).arg("init").assert().success();
    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn plan_uses_config_default_sections() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("proctor.toml"),
        "default_sections = [\"D\"]\n",
    )
    .unwrap();

    proctor()
        .current_dir(dir.path())
        .args(["plan", "--seed", "config-seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"D\""))
        .stdout(predicate::str::contains("\"code\": \"A\"").not());
}
