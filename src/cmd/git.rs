// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git settings check and working copy removal.

use anyhow::Context;
use std::path::Path;
use tracing::info;

use crate::cli::git::CleanArgs;
use crate::config::Config;
use crate::error::{GitError, Result};
use crate::git::query::is_work_tree;
use crate::git::runner::GitRunner;
use crate::git::sync::ensure_git_identity;

/// Report the git executable and committer identity.
///
/// # Errors
///
/// Returns an error if git is missing or `user.name`/`user.email` is unset.
pub fn run_check_git_command(config: &Config) -> Result<()> {
    let runner = GitRunner::new()?;
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let version = runner.run_checked(&["--version"], &cwd)?;
    println!("git:        {} ({})", version.stdout.trim(), runner.program().display());

    let (name, email) = ensure_git_identity(&runner, &cwd)?;
    println!("user.name:  {name}");
    println!("user.email: {email}");
    println!("auth:       {}", config.auth.helper);
    Ok(())
}

/// Delete the local working copy.
///
/// # Errors
///
/// Returns an error if the directory is not a git work tree or cannot be
/// removed.
pub fn run_clean_command(args: &CleanArgs, config: &Config) -> Result<()> {
    let dir = args.local_dir.as_deref().unwrap_or(&config.hub.local_dir);
    clean_working_copy(dir, config.global.dry)?;
    Ok(())
}

/// Remove `dir` if it is a git work tree. A missing directory is not an error.
///
/// Returns whether anything was (or, for a dry run, would be) deleted.
///
/// # Errors
///
/// Returns `GitError::NotARepository` for a directory that is not a work tree,
/// or an I/O error if removal fails.
pub fn clean_working_copy(dir: &Path, dry_run: bool) -> Result<bool> {
    if !dir.exists() {
        println!("Nothing to delete: {} does not exist", dir.display());
        return Ok(false);
    }
    if !is_work_tree(dir) {
        return Err(GitError::NotARepository {
            path: dir.display().to_string(),
        }
        .into());
    }

    if dry_run {
        println!("Would delete {}", dir.display());
        return Ok(true);
    }

    std::fs::remove_dir_all(dir).with_context(|| format!("failed to delete {}", dir.display()))?;
    info!(dir = %dir.display(), "working copy deleted");
    println!("Deleted {}", dir.display());
    Ok(true)
}
