//! Integration tests for the `trackly` CLI binary.
//!
//! Argument parsing, help, completions and local validation run without a
//! server; list/get/create/edit/health run against a wiremock instance.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const NO_CONFIG_HOME: &str = "/tmp/trackly-cli-test-nonexistent";

/// Build a [`Command`] for the `trackly` binary with env isolation.
///
/// Clears all `TRACKLY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn trackly_cmd() -> assert_cmd::Command {
    trackly_cmd_in(Path::new(NO_CONFIG_HOME))
}

/// Like [`trackly_cmd`], but with `HOME` and `XDG_CONFIG_HOME` at `home`.
fn trackly_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("trackly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TRACKLY_PROFILE")
        .env_remove("TRACKLY_API_URL")
        .env_remove("TRACKLY_OUTPUT")
        .env_remove("TRACKLY_INSECURE")
        .env_remove("TRACKLY_TIMEOUT");
    cmd
}

/// Write `contents` to wherever the binary looks for its config under `home`.
fn write_config(home: &Path, contents: &str) {
    let output = trackly_cmd_in(home).args(["config", "path"]).output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let file = PathBuf::from(String::from_utf8(output.stdout).unwrap().trim());
    std::fs::create_dir_all(file.parent().unwrap()).unwrap();
    std::fs::write(file, contents).unwrap();
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(args: Vec<String>) -> std::process::Output {
    run_in(PathBuf::from(NO_CONFIG_HOME), args).await
}

async fn run_in(home: PathBuf, args: Vec<String>) -> std::process::Output {
    tokio::task::spawn_blocking(move || trackly_cmd_in(&home).args(&args).output().unwrap())
        .await
        .unwrap()
}

/// Answer the list request every save follows up with.
async fn mount_empty_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [],
            "total": 0,
            "page": 1
        })))
        .mount(server)
        .await;
}

fn args(server: &MockServer, rest: &[&str]) -> Vec<String> {
    let mut out = vec!["--api-url".to_owned(), server.uri()];
    out.extend(rest.iter().map(|s| (*s).to_owned()));
    out
}

fn issue_json(id: u64, assignee: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Issue {id}"),
        "status": "open",
        "priority": "high",
        "assignee": assignee,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": "2024-03-02T10:30:00Z"
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = trackly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    trackly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("issues")
            .and(predicate::str::contains("browse"))
            .and(predicate::str::contains("health")),
    );
}

#[test]
fn test_version_flag() {
    trackly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trackly"));
}

#[test]
fn test_issues_list_help_shows_filters() {
    trackly_cmd()
        .args(["issues", "list", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--status")
                .and(predicate::str::contains("--page-size"))
                .and(predicate::str::contains("--sort")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    trackly_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    trackly_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    trackly_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = trackly_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_sort_field() {
    let output = trackly_cmd()
        .args(["issues", "list", "--sort", "colour"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("createdAt"));
}

#[test]
fn test_asc_and_desc_conflict() {
    let output = trackly_cmd()
        .args(["issues", "list", "--asc", "--desc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_blank_title_rejected_before_network() {
    // Port 9 (discard) is never reached: validation fails first.
    let output = trackly_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "issues", "create", "--title", "   "])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("title is required"));
}

#[test]
fn test_edit_without_fields_is_usage_error() {
    let output = trackly_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "issues", "edit", "7"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nothing to change"));
}

#[test]
fn test_unknown_profile_is_config_error() {
    let output = trackly_cmd()
        .args(["--profile", "nope", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Profile 'nope' not found"));
}

#[test]
fn test_browse_requires_terminal() {
    let output = trackly_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "browse"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("interactive terminal"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    trackly_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    trackly_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[defaults]")
                .and(predicate::str::contains("page_size = 10"))
                .and(predicate::str::contains("sort_by = \"updatedAt\"")),
        );
}

// ── Against a mock API ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_reports_page_label() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .and(query_param("status", "open"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [issue_json(1, "alice"), issue_json(2, "bob"), issue_json(3, "alice")],
            "total": 3,
            "page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(args(
        &server,
        &["-o", "json", "issues", "list", "--status", "open"],
    ))
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["pageLabel"], "Page 1 / 1 \u{2014} 3 items");
    assert_eq!(body["assigneeOptions"], json!(["alice", "bob"]));
    assert_eq!(body["rows"].as_array().unwrap().len(), 3);
    assert_eq!(body["rows"][0]["status"], "open");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_page_past_end_is_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [issue_json(1, "alice")],
            "total": 25,
            "page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [issue_json(21, "carol")],
            "total": 25,
            "page": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(args(&server, &["-o", "plain", "issues", "list", "--page", "9"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "21");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_table_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [issue_json(5, "alice")],
            "total": 1,
            "page": 1
        })))
        .mount(&server)
        .await;

    let output = run(args(&server, &["issues", "list"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Issue 5"));
    assert!(stdout.contains("Page 1 / 1 \u{2014} 1 items"));
    assert!(stdout.contains("Assignees: [all], alice"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_issue_fails_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Issue not found"))
        .mount(&server)
        .await;

    let output = run(args(&server, &["issues", "get", "999"])).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Issue not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_general() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db unavailable"))
        .mount(&server)
        .await;

    let output = run(args(&server, &["issues", "list"])).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("db unavailable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let output = run(args(&server, &["-o", "plain", "health"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_default_output_applies_without_flag() {
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), "[defaults]\noutput = \"json\"\n");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [issue_json(5, "alice")],
            "total": 1,
            "page": 1
        })))
        .mount(&server)
        .await;

    let output = run_in(home.path().to_owned(), args(&server, &["issues", "list"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["rows"][0]["id"], 5);

    // An explicit flag still wins over the configured default.
    let output = run_in(
        home.path().to_owned(),
        args(&server, &["-o", "plain", "issues", "list"]),
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "5");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_posts_draft_and_reports_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/issues"))
        .and(body_json(json!({
            "title": "Printer on fire",
            "status": "open",
            "priority": "high",
            "assignee": "alice"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "title": "Printer on fire",
            "status": "open",
            "priority": "high",
            "assignee": "alice"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server).await;

    let output = run(args(
        &server,
        &[
            "issues",
            "create",
            "--title",
            "  Printer on fire ",
            "--priority",
            "high",
            "--assignee",
            "alice",
        ],
    ))
    .await;
    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("✓ Created issue #42"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Printer on fire"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_keeps_fields_not_passed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/issues/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "Old title",
            "description": "Toner everywhere",
            "status": "in-progress",
            "priority": "high",
            "assignee": "bob"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/issues/7"))
        .and(body_json(json!({
            "title": "X",
            "description": "Toner everywhere",
            "status": "in-progress",
            "priority": "high",
            "assignee": "bob"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "X",
            "description": "Toner everywhere",
            "status": "in-progress",
            "priority": "high",
            "assignee": "bob"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server).await;

    let output = run(args(&server, &["issues", "edit", "7", "--title", "X"])).await;
    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("✓ Updated issue #7"));
}
