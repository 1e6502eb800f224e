// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `mrhub` binary.
//!
//! Runs offline commands end to end in a scratch directory.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn mrhub(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mrhub"))
        .args(args)
        .current_dir(cwd)
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_USERNAME")
        .env_remove("GITHUB_PASSWORD")
        .output()
        .expect("failed to run mrhub")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Version / Config
// =============================================================================

#[test]
fn cli_version() {
    let temp = temp_dir();
    for args in [["version"], ["-v"]] {
        let output = mrhub(&args, temp.path());
        assert!(output.status.success());
        assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
    }
}

#[test]
fn cli_options_reads_local_config() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("mrhub.toml"), "[hub]\nmain_branch = \"main\"\n").unwrap();

    let output = mrhub(&["options", "--set", "auth.helper=script"], temp.path());
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.lines().any(|l| l == "hub.main_branch         = main"), "{text}");
    assert!(text.lines().any(|l| l == "auth.helper             = script"), "{text}");
}

#[test]
fn cli_log_file_from_config() {
    let temp = temp_dir();
    std::fs::write(
        temp.path().join("mrhub.toml"),
        "[global]\nlog_file = \"logs/mrhub.log\"\nfile_log_level = 3\n",
    )
    .unwrap();

    let output = mrhub(&["record", "new", "tool.json", "--name", "Tool"], temp.path());
    assert!(output.status.success());

    let log = std::fs::read_to_string(temp.path().join("logs").join("mrhub.log")).unwrap();
    assert!(log.contains("record saved"), "{log}");
}

#[test]
fn cli_no_command_fails() {
    let temp = temp_dir();
    assert!(!mrhub(&[], temp.path()).status.success());
}

// =============================================================================
// Record
// =============================================================================

#[test]
fn cli_record_new_then_show() {
    let temp = temp_dir();
    let created = mrhub(
        &[
            "record",
            "new",
            "tool.json",
            "--name",
            "Tool",
            "--keyword",
            "mri",
            "--resource",
            "Docker|https://hub.docker.com/r/tool",
        ],
        temp.path(),
    );
    assert!(created.status.success());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("tool.json")).unwrap())
            .unwrap();
    assert_eq!(saved["name"], "Tool");
    assert_eq!(saved["keywords"][0], "mri");
    assert_eq!(saved["extraResources"][0]["resourceType"], "Docker");

    let shown = mrhub(&["record", "show", "tool.json"], temp.path());
    assert!(shown.status.success());
    let text = stdout(&shown);
    assert!(text.starts_with("  {"), "{text}");
    assert!(text.trim_end().ends_with("},"), "{text}");

    let again = mrhub(&["record", "new", "tool.json"], temp.path());
    assert!(!again.status.success());
}

// =============================================================================
// Publish (dry run)
// =============================================================================

#[test]
fn cli_publish_dry_run_touches_nothing() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("tool.json"), r#"{ "name": "Tool" }"#).unwrap();

    let output = mrhub(
        &["publish", "tool.json", "--branch", "add-tool", "--dry"],
        temp.path(),
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("dry run: would publish 'Tool'"), "{text}");
    assert!(text.contains("branch    add-tool"));
    assert!(!temp.path().join("local_mrhub_repo").exists());
}

#[test]
fn cli_publish_rejects_bad_branch() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("tool.json"), r#"{ "name": "Tool" }"#).unwrap();

    let output = mrhub(
        &["publish", "tool.json", "--branch", "add tool", "--dry"],
        temp.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid branch name"));
}
