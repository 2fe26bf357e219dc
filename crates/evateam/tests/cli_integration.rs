//! CLI integration tests for the `evateam` binary.
//!
//! None of these reach the network: they cover argument parsing, help
//! output and `--kwargs-only` translation.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the evateam binary with no ambient configuration.
fn evateam() -> Command {
    let mut cmd = Command::cargo_bin("evateam").unwrap();
    cmd.env_remove("EVA_API_URL")
        .env_remove("EVA_API_TOKEN")
        .env_remove("EVA_DEBUG")
        .env_remove("EVA_TIMEOUT");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    evateam()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_displays() {
    evateam()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("evateam"));
}

#[test]
fn test_token_value_hidden_in_help() {
    evateam()
        .env("EVA_API_TOKEN", "super-secret")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("super-secret").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// Query
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_kwargs_only() {
    evateam()
        .args([
            "--compact",
            "query",
            "task",
            "--select",
            "id,code",
            "--where",
            "cache_status_type == OPEN",
            "--where",
            "priority > 2",
            "--offset",
            "100",
            "--limit",
            "50",
            "--kwargs-only",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""method":"CmfTask.list""#))
        .stdout(predicate::str::contains(
            r#""filter":[["cache_status_type","==","OPEN"],["priority",">",2]]"#,
        ))
        .stdout(predicate::str::contains(r#""slice":[100,150]"#));
}

#[test]
fn test_query_unknown_entity() {
    evateam()
        .args(["query", "widgets", "--kwargs-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown entity"));
}

#[test]
fn test_query_bad_condition() {
    evateam()
        .args(["query", "task", "--where", "name ~ x", "--kwargs-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported operator"));
}

#[test]
fn test_query_requires_url() {
    evateam()
        .args(["query", "project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EVA_API_URL"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tools_list() {
    evateam()
        .args(["--url", "https://eva.example.com", "--token", "t", "tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eva_task_list"))
        .stdout(predicate::str::contains("eva_comment_create"));
}

#[test]
fn test_tools_call_rejects_bad_json() {
    evateam()
        .args([
            "--url",
            "https://eva.example.com",
            "--token",
            "t",
            "tools",
            "call",
            "eva_task_get",
            "{not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}
