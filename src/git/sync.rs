// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working copy synchronization and submission steps.
//!
//! ```text
//! clone_fork       work tree?  --yes--> warn, skip
//!                      | no
//!                  git clone <fork> <dir>   "already exists" -> warn,
//!                                           not a work tree -> NotARepository
//!
//! track_upstream   work tree root? (never an enclosing repository)
//!                  checkout <main>
//!                  remote get-url upstream  -> set-url | add
//!                  pull --no-rebase origin <main>
//!                  fetch upstream
//!                  merge --no-edit -X theirs upstream/<main>
//!
//! create_branch    ^[A-Za-z0-9_-]+$
//!                  rev-parse --verify --quiet refs/heads/<b>  -> BranchExists
//!                  checkout -b <b>
//!                  gix: HEAD == <b>
//!
//! stage / commit_all / push_branch (authenticated)
//! ```
//!
//! Every step runs to completion before the next starts; the first failure
//! ends the sequence.

use regex::Regex;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info, warn};

use super::credentials::CredentialProvider;
use super::query::{current_branch, is_work_tree};
use super::runner::GitRunner;
use crate::error::{GitError, HubError, HubResult};

/// Allowed submission branch names.
pub const BRANCH_PATTERN: &str = "^[A-Za-z0-9_-]+$";

/// Remote name registered for the upstream catalog.
pub const UPSTREAM_REMOTE: &str = "upstream";

/// What [`clone_fork`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    AlreadyPresent,
}

/// Clone the fork into `local_dir`, reusing an existing work tree.
///
/// # Errors
///
/// Returns `GitError::CloneFailed` if git cannot clone for any reason other
/// than the destination already existing, or `GitError::NotARepository` if
/// the existing destination is not a work tree of its own.
pub fn clone_fork(runner: &GitRunner, fork_url: &str, local_dir: &Path) -> HubResult<CloneOutcome> {
    if is_work_tree(local_dir) {
        warn!(dir = %local_dir.display(), "working copy already exists, skipping clone");
        return Ok(CloneOutcome::AlreadyPresent);
    }

    let dest = std::path::absolute(local_dir)?;
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    info!(url = %fork_url, dir = %dest.display(), "cloning fork");
    let output = runner.run(
        &[OsStr::new("clone"), OsStr::new(fork_url), dest.as_os_str()],
        parent,
    )?;
    if output.success() {
        return Ok(CloneOutcome::Cloned);
    }

    if output.stderr.contains("already exists") {
        warn!(
            dir = %dest.display(),
            stderr = %output.stderr.trim(),
            "clone destination already exists"
        );
        ensure_work_tree(&dest)?;
        return Ok(CloneOutcome::AlreadyPresent);
    }

    Err(GitError::CloneFailed {
        url: fork_url.to_string(),
        message: output.stderr.trim().to_string(),
    }
    .into())
}

/// Bring `main_branch` of the working copy level with upstream.
///
/// Conflicts resolve in favor of upstream (`-X theirs`).
///
/// # Errors
///
/// Returns `GitError::NotARepository` if `local_dir` is not a work tree root,
/// or `GitError::Transport` for the first git step that exits non-zero.
pub fn track_upstream(
    runner: &GitRunner,
    local_dir: &Path,
    upstream_url: &str,
    main_branch: &str,
) -> HubResult<()> {
    ensure_work_tree(local_dir)?;
    runner.run_checked(&["checkout", main_branch], local_dir)?;

    let existing = runner.run(&["remote", "get-url", UPSTREAM_REMOTE], local_dir)?;
    if existing.success() {
        debug!(
            previous = %existing.stdout.trim(),
            url = %upstream_url,
            "upstream remote exists, updating url"
        );
        runner.run_checked(&["remote", "set-url", UPSTREAM_REMOTE, upstream_url], local_dir)?;
    } else {
        runner.run_checked(&["remote", "add", UPSTREAM_REMOTE, upstream_url], local_dir)?;
    }

    info!(branch = %main_branch, "syncing with upstream");
    runner.run_checked(&["pull", "--no-rebase", "origin", main_branch], local_dir)?;
    runner.run_checked(&["fetch", UPSTREAM_REMOTE], local_dir)?;
    let upstream_ref = format!("{UPSTREAM_REMOTE}/{main_branch}");
    runner.run_checked(
        &["merge", "--no-edit", "-X", "theirs", upstream_ref.as_str()],
        local_dir,
    )?;
    Ok(())
}

/// `dir` must be a work tree root itself; an enclosing repository does not
/// count.
fn ensure_work_tree(dir: &Path) -> HubResult<()> {
    if is_work_tree(dir) {
        return Ok(());
    }
    Err(GitError::NotARepository {
        path: dir.display().to_string(),
    }
    .into())
}

/// Check a branch name against [`BRANCH_PATTERN`].
///
/// # Errors
///
/// Returns `GitError::InvalidBranchName` if the name has other characters.
pub fn validate_branch_name(branch: &str) -> HubResult<()> {
    let pattern = Regex::new(BRANCH_PATTERN)
        .map_err(|e| HubError::other(format!("invalid branch pattern: {e}")))?;
    if pattern.is_match(branch) {
        Ok(())
    } else {
        Err(GitError::InvalidBranchName {
            branch: branch.to_string(),
        }
        .into())
    }
}

/// Create and switch to `branch`.
///
/// # Errors
///
/// Returns `GitError::InvalidBranchName` or `GitError::BranchExists` before
/// touching the working copy, `GitError::Transport` if checkout fails, or
/// `GitError::UnexpectedBranch` if HEAD did not move to the new branch.
pub fn create_branch(runner: &GitRunner, local_dir: &Path, branch: &str) -> HubResult<()> {
    validate_branch_name(branch)?;

    let ref_name = format!("refs/heads/{branch}");
    let exists = runner.run(&["rev-parse", "--verify", "--quiet", ref_name.as_str()], local_dir)?;
    if exists.success() {
        return Err(GitError::BranchExists {
            branch: branch.to_string(),
        }
        .into());
    }

    info!(branch = %branch, "creating branch");
    let output = runner.run(&["checkout", "-b", branch], local_dir)?;
    if !output.success() {
        if output.stderr.contains("already exists") || output.stderr.contains("fatal") {
            return Err(GitError::BranchExists {
                branch: branch.to_string(),
            }
            .into());
        }
        output.check(format!("git checkout -b {branch}"))?;
    }

    match current_branch(local_dir)? {
        Some(ref name) if name == branch => Ok(()),
        found => Err(GitError::UnexpectedBranch {
            expected: branch.to_string(),
            found: found.unwrap_or_else(|| "detached HEAD".to_string()),
        }
        .into()),
    }
}

/// `git add <path>`.
///
/// # Errors
///
/// Returns `GitError::Transport` if git exits non-zero.
pub fn stage(runner: &GitRunner, local_dir: &Path, path: &Path) -> HubResult<()> {
    runner.run_checked(&[OsStr::new("add"), OsStr::new("--"), path.as_os_str()], local_dir)?;
    Ok(())
}

/// `git commit -a -m <message>`.
///
/// # Errors
///
/// Returns `GitError::Transport` if git exits non-zero.
pub fn commit_all(runner: &GitRunner, local_dir: &Path, message: &str) -> HubResult<()> {
    info!(message = %message, "committing");
    runner.run_checked(&["commit", "-a", "-m", message], local_dir)?;
    Ok(())
}

/// `git push -u origin <branch>` with credentials from `provider`.
///
/// # Errors
///
/// Returns `GitError::PushFailed` if the remote rejects the push, or a
/// `CredentialError` if the authentication responder cannot be set up.
pub fn push_branch(
    runner: &GitRunner,
    local_dir: &Path,
    branch: &str,
    provider: &dyn CredentialProvider,
) -> HubResult<()> {
    info!(branch = %branch, helper = %runner.auth_helper(), "pushing");
    let output = runner.run_authenticated(&["push", "-u", "origin", branch], local_dir, provider)?;
    if output.success() {
        return Ok(());
    }
    Err(GitError::PushFailed {
        branch: branch.to_string(),
        stderr: output.stderr.trim().to_string(),
    }
    .into())
}

/// Read the committer identity.
///
/// Returns `(user.name, user.email)`.
///
/// # Errors
///
/// Returns `GitError::IdentityNotConfigured` naming the first unset key.
pub fn ensure_git_identity(runner: &GitRunner, cwd: &Path) -> HubResult<(String, String)> {
    let read = |key: &str| -> HubResult<String> {
        let output = runner.run(&["config", "--get", key], cwd)?;
        let value = output.stdout.trim();
        if !output.success() || value.is_empty() {
            return Err(GitError::IdentityNotConfigured {
                key: key.to_string(),
            }
            .into());
        }
        Ok(value.to_string())
    };
    Ok((read("user.name")?, read("user.email")?))
}
