// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::git::clean_working_copy;
use super::publish::publish_plan;
use super::record::{edit_record, run_record_command};
use crate::catalog::CatalogRecord;
use crate::catalog::form::FormEdits;
use crate::cli::record::{
    RecordArgs, RecordEditArgs, RecordFieldArgs, RecordNewArgs, RecordShowArgs, RecordSubcommand,
};
use crate::config::Config;
use crate::error::GitError;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn new_args(file: &Path, fields: RecordFieldArgs) -> RecordArgs {
    RecordArgs {
        subcommand: RecordSubcommand::New(RecordNewArgs {
            file: file.to_path_buf(),
            force: false,
            fields,
        }),
    }
}

#[test]
fn test_publish_plan() {
    let config = Config::default();
    let record = CatalogRecord {
        name: "Tool".to_string(),
        image_file: "tool.png".to_string(),
        ..CatalogRecord::default()
    };
    let plan = publish_plan(
        &config,
        &record,
        "add-tool",
        Path::new("local_mrhub_repo"),
        Some(Path::new("logo.png")),
    );
    insta::assert_snapshot!(plan.join("\n"), @r#"
    dry run: would publish 'Tool'
      fork      ismrm/mrhub (via https://api.github.com)
      clone     <fork> into local_mrhub_repo
      sync      master from https://github.com/ismrm/mrhub.git
      branch    add-tool
      image     logo.png -> images_packages/tool.png
      insert    _data/projects.json
      commit    "Package addition - generated by mrhub-submit"
      push      origin add-tool (auth: environment)
    "#);
}

#[test]
fn test_publish_plan_skips_image_without_name() {
    let config = Config::default();
    let plan = publish_plan(
        &config,
        &CatalogRecord::default(),
        "b",
        Path::new("w"),
        Some(Path::new("logo.png")),
    );
    assert!(plan.iter().any(|l| l.contains("skipped (record has no imageFile)")));
}

#[test]
fn test_record_new_edit_show() {
    let temp = temp_dir();
    let file = temp.path().join("tool.json");

    let fields = RecordFieldArgs {
        name: Some("Tool".to_string()),
        keywords: vec!["a".to_string(), "b".to_string()],
        references: vec![("Paper".to_string(), "https://doi.org/1".to_string())],
        ..RecordFieldArgs::default()
    };
    run_record_command(&new_args(&file, fields.clone())).unwrap();

    let saved = CatalogRecord::load(&file).unwrap();
    assert_eq!(saved.name, "Tool");
    assert_eq!(saved.keywords, vec!["a", "b"]);
    assert_eq!(saved.key_references[0].url, "https://doi.org/1");

    // new refuses to overwrite without --force
    assert!(run_record_command(&new_args(&file, fields)).is_err());

    let edit = RecordArgs {
        subcommand: RecordSubcommand::Edit(RecordEditArgs {
            file: file.clone(),
            fields: RecordFieldArgs {
                category: Some("Analysis".to_string()),
                keywords: vec!["c".to_string()],
                ..RecordFieldArgs::default()
            },
            remove_keywords: vec![1],
            remove_references: vec![1],
            remove_resources: Vec::new(),
        }),
    };
    run_record_command(&edit).unwrap();

    let edited = CatalogRecord::load(&file).unwrap();
    assert_eq!(edited.name, "Tool");
    assert_eq!(edited.category, "Analysis");
    assert_eq!(edited.keywords, vec!["b", "c"]);
    assert!(edited.key_references.is_empty());

    let show = RecordArgs {
        subcommand: RecordSubcommand::Show(RecordShowArgs { file }),
    };
    run_record_command(&show).unwrap();
}

#[test]
fn test_edit_record_rejects_bad_row() {
    let edits = FormEdits {
        remove_resources: vec![1],
        ..FormEdits::default()
    };
    let err = edit_record(&CatalogRecord::default(), &edits).unwrap_err();
    assert!(format!("{err:#}").contains("no resource row 1"));
}

#[test]
fn test_clean_missing_directory_is_noop() {
    let temp = temp_dir();
    assert!(!clean_working_copy(&temp.path().join("missing"), false).unwrap());
}

#[test]
fn test_clean_refuses_non_repository() {
    let temp = temp_dir();
    let dir = temp.path().join("plain");
    std::fs::create_dir_all(&dir).unwrap();

    let err = clean_working_copy(&dir, false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::NotARepository { .. })
    ));
    assert!(dir.exists());
}

#[test]
fn test_clean_deletes_work_tree() {
    let temp = temp_dir();
    let dir = temp.path().join("repo");
    std::fs::create_dir_all(&dir).unwrap();
    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(&dir)
        .status()
        .unwrap();
    assert!(status.success());

    assert!(clean_working_copy(&dir, true).unwrap());
    assert!(dir.exists());

    assert!(clean_working_copy(&dir, false).unwrap());
    assert!(!dir.exists());
}
