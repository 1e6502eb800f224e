// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository queries using gix.
//!
//! ```text
//! query.rs --> gix --> .git/ (no subprocess)
//! ```

use std::path::Path;

use crate::error::{GitError, GixError, HubResult};

/// Check whether `path` itself is the root of a git work tree.
///
/// Parent directories are not searched, so an empty directory inside some
/// other repository is not a work tree.
#[must_use]
pub fn is_work_tree(path: &Path) -> bool {
    gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> HubResult<Option<String>> {
    let repo = gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
    let head = repo
        .head_name()
        .map_err(|e| GitError::Gix(GixError::Head(e)))?;
    Ok(head.map(|name| name.shorten().to_string()))
}
