// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::record::{RecordSubcommand, parse_pair};
use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["mrhub", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "mrhub",
        "-l",
        "5",
        "--config",
        "a.toml",
        "--config",
        "b.toml",
        "-s",
        "hub.main_branch=main",
        "--dry",
        "options",
    ])
    .unwrap();
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );

    let overrides: Vec<String> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    insta::assert_snapshot!(overrides.join("\n"), @r"
    hub.main_branch=main
    global.output_log_level=5
    global.file_log_level=5
    global.dry=true
    ");
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["mrhub", "clean", "--dry", "--local-dir", "work"]).unwrap();
    assert!(cli.global.dry);
    match cli.command {
        Some(Command::Clean(args)) => assert_eq!(args.local_dir, Some(PathBuf::from("work"))),
        other => panic!("expected clean, got {other:?}"),
    }
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["mrhub", "-l", "7", "version"]).is_err());
    assert!(Cli::try_parse_from(["mrhub", "-s", "novalue", "version"]).is_err());
}

#[test]
fn test_parse_record_new() {
    let cli = Cli::try_parse_from([
        "mrhub",
        "record",
        "new",
        "tool.json",
        "--name",
        "Tool",
        "--category",
        "Analysis",
        "--keyword",
        "a",
        "--keyword",
        "b",
        "--reference",
        "Paper one|https://doi.org/1",
        "--resource",
        "Docker",
    ])
    .unwrap();

    let Some(Command::Record(args)) = cli.command else {
        panic!("expected record command");
    };
    let RecordSubcommand::New(new) = args.subcommand else {
        panic!("expected record new");
    };
    assert_eq!(new.file, PathBuf::from("tool.json"));
    assert!(!new.force);

    let edits = new.fields.to_edits();
    assert_eq!(edits.name.as_deref(), Some("Tool"));
    assert_eq!(edits.category.as_deref(), Some("Analysis"));
    assert_eq!(edits.short_description, None);
    assert_eq!(edits.keywords, vec!["a", "b"]);
    assert_eq!(
        edits.references,
        vec![("Paper one".to_string(), "https://doi.org/1".to_string())]
    );
    assert_eq!(edits.resources, vec![("Docker".to_string(), String::new())]);
}

#[test]
fn test_parse_record_edit_removals() {
    let cli = Cli::try_parse_from([
        "mrhub",
        "record",
        "edit",
        "tool.json",
        "--remove-keyword",
        "2",
        "--remove-resource",
        "1",
        "--remove-resource",
        "3",
        "--developers",
        "A. Author",
    ])
    .unwrap();

    let Some(Command::Record(args)) = cli.command else {
        panic!("expected record command");
    };
    let RecordSubcommand::Edit(edit) = args.subcommand else {
        panic!("expected record edit");
    };
    let edits = edit.to_edits();
    assert_eq!(edits.remove_keywords, vec![2]);
    assert!(edits.remove_references.is_empty());
    assert_eq!(edits.remove_resources, vec![1, 3]);
    assert_eq!(edits.principal_developers.as_deref(), Some("A. Author"));
}

#[test]
fn test_remove_flags_only_on_edit() {
    assert!(
        Cli::try_parse_from(["mrhub", "record", "new", "t.json", "--remove-keyword", "1"]).is_err()
    );
}

#[test]
fn test_parse_pair() {
    assert_eq!(
        parse_pair("A | B|https://x.org/a|b"),
        Ok(("A | B|https://x.org/a".to_string(), "b".to_string()))
    );
    assert_eq!(
        parse_pair(" Text | https://x.org "),
        Ok(("Text".to_string(), "https://x.org".to_string()))
    );
    assert_eq!(parse_pair("Tutorial"), Ok(("Tutorial".to_string(), String::new())));
    assert!(parse_pair("|https://x.org").is_err());
    assert!(parse_pair("").is_err());
}

#[test]
fn test_parse_publish() {
    let cli = Cli::try_parse_from([
        "mrhub",
        "publish",
        "tool.json",
        "--branch",
        "add-tool",
        "--local-dir",
        "work",
        "--image",
        "logo.png",
        "--token",
        "ghp_example",
    ])
    .unwrap();

    let Some(Command::Publish(args)) = cli.command else {
        panic!("expected publish command");
    };
    assert_eq!(args.file, PathBuf::from("tool.json"));
    assert_eq!(args.branch, "add-tool");
    assert_eq!(args.local_dir, Some(PathBuf::from("work")));
    assert_eq!(args.image, Some(PathBuf::from("logo.png")));
    assert_eq!(args.credentials.token.as_deref(), Some("ghp_example"));

    let debug = format!("{:?}", args.credentials);
    assert!(!debug.contains("ghp_example"));
}

#[test]
fn test_publish_requires_branch() {
    assert!(Cli::try_parse_from(["mrhub", "publish", "tool.json"]).is_err());
}

#[test]
fn test_parse_citation() {
    let cli = Cli::try_parse_from(["mrhub", "citation", "DOI:10.1002/mrm.1"]).unwrap();
    let Some(Command::Citation(args)) = cli.command else {
        panic!("expected citation command");
    };
    assert_eq!(args.query.as_deref(), Some("DOI:10.1002/mrm.1"));

    assert!(Cli::try_parse_from(["mrhub", "citation", "--record", "tool.json"]).is_ok());
    assert!(Cli::try_parse_from(["mrhub", "citation"]).is_err());
    assert!(Cli::try_parse_from(["mrhub", "citation", "q", "--record", "tool.json"]).is_err());
}

#[test]
fn test_parse_check_git() {
    let cli = Cli::try_parse_from(["mrhub", "check-git"]).unwrap();
    assert!(matches!(cli.command, Some(Command::CheckGit)));
}
