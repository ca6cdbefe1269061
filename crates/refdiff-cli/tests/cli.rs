use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn refdiff() -> Command {
    let mut cmd: Command = cargo_bin_cmd!("refdiff").into();
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a plan file into a fresh tempdir. The tempdir guard must be kept alive.
fn plan_file(content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("plan.json");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    refdiff()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("refdiff"));
}

// --- Check ---

#[test]
fn check_accepts_route_example() {
    let (_tmp, path) =
        plan_file(r#"[[{"plugin":"refdiff","options":{"repoId":"r1","pairs":[]}}]]"#);
    refdiff()
        .args(["check", arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan is valid"))
        .stdout(predicate::str::contains("Stages: 1"))
        .stdout(predicate::str::contains("r1"))
        .stderr(predicate::str::contains("Plan is valid").not());
}

#[test]
fn check_json_summary() {
    let (_tmp, path) = plan_file(
        r#"[[{"plugin":"refdiff","options":{"repoId":"r1","pairs":[{"newRef":"v2.0","oldRef":"v1.0"}]}}],
            [{"plugin":"refdiff","options":{"repoId":"r2","pairs":[]}}]]"#,
    );
    let summary = stdout_json(refdiff().args(["check", "--json", arg(&path)]));
    assert_eq!(summary["stages"], 2);
    assert_eq!(summary["tasks"], 2);
    assert_eq!(summary["pairs"], 1);
    assert_eq!(summary["repo_ids"], serde_json::json!(["r1", "r2"]));
}

#[test]
fn check_reads_stdin() {
    refdiff()
        .args(["check", "-"])
        .write_stdin(r#"[[{"plugin":"refdiff","options":{"repoId":"r1"}}]]"#)
        .assert()
        .success();
}

#[test]
fn check_rejects_missing_repo_id() {
    let (_tmp, path) = plan_file(r#"[[{"plugin":"refdiff","options":{"pairs":[]}}]]"#);
    refdiff()
        .args(["check", arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn check_rejects_unknown_subtask() {
    let (_tmp, path) = plan_file(
        r#"[[{"plugin":"refdiff","options":{"repoId":"r1","tasks":["calculateCommitDiff"]}}]]"#,
    );
    refdiff()
        .args(["check", arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("calculateCommitsDiff"));
}

#[test]
fn check_missing_file() {
    refdiff()
        .args(["check", "/nonexistent/plan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// --- Tasks ---

#[test]
fn tasks_lists_defaults() {
    refdiff()
        .arg("tasks")
        .assert()
        .success()
        .stdout(predicate::str::contains("calculateCommitsDiff"))
        .stdout(predicate::str::contains("calculateProjectDeploymentCommitsDiff"));
}

#[test]
fn tasks_selection() {
    refdiff()
        .args(["tasks", "--select", "calculateIssuesDiff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calculateIssuesDiff"))
        .stdout(predicate::str::contains("calculateCommitsDiff").not());
}

// --- Stage ---

#[test]
fn stage_builds_plan() {
    let plan = stdout_json(refdiff().args([
        "stage",
        "--plugin",
        "github",
        "--connection",
        "1",
        "--source",
        "384111310",
        "--pair",
        "refs/tags/v0.6.0:refs/tags/v0.5.0",
        "--tags-limit",
        "5",
    ]));

    let entry = &plan[0][0];
    assert_eq!(entry["plugin"], "refdiff");
    assert_eq!(entry["options"]["repoId"], "github:GithubRepo:1:384111310");
    assert_eq!(entry["options"]["pairs"][0]["newRef"], "refs/tags/v0.6.0");
    assert_eq!(entry["options"]["tagsLimit"], 5);
    assert!(entry["options"].get("tasks").is_none());
}

#[test]
fn stage_output_passes_check() {
    let output = refdiff()
        .args(["stage", "--repo-id", "r1", "--pair", "v2:v1", "--compact"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    refdiff()
        .args(["check", "-"])
        .write_stdin(output)
        .assert()
        .success();
}

#[test]
fn stage_requires_repo() {
    refdiff()
        .args(["stage", "--pair", "v2:v1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repo-id"));
}

#[test]
fn stage_rejects_identical_refs() {
    refdiff()
        .args(["stage", "--repo-id", "r1", "--pair", "v1:v1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("same"));
}

// --- OpenAPI ---

#[test]
fn openapi_documents_refdiff_route() {
    let doc = stdout_json(refdiff().args(["openapi", "--compact"]));
    assert_eq!(doc["openapi"], "3.0.3");
    assert!(doc["paths"]["/blueprints/refdiff/blueprint-plan"]["post"].is_object());
}
