// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish orchestration.
//!
//! ```text
//! Session { local_directory, identity, branch, fork: None }
//!    |
//!    v
//! Authenticate  api.authenticated_user()
//! Fork          api.repository(upstream) -> api.create_fork()  => Session { fork: Some }
//! Clone         sync::clone_fork(<host>/<fork>.git)
//! Sync          sync::track_upstream(<host>/<upstream>.git, main)
//! Branch        sync::create_branch(branch)
//! Edit          copy_image + catalog::insert_record
//! Commit        sync::commit_all(message)
//! Push          sync::push_branch(branch, identity)
//!    |
//!    v
//! PublishOutcome { session, login, compare_url }
//! ```
//!
//! Steps run strictly in order. The first error ends the run; nothing already
//! done is rolled back.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::catalog::CatalogRecord;
use crate::catalog::insert::insert_record;
use crate::config::types::HubConfig;
use crate::error::{FsError, HubResult};
use crate::git::runner::GitRunner;
use crate::git::sync::{clone_fork, commit_all, create_branch, push_branch, stage, track_upstream};
use crate::hosting::{HostingApi, Identity, RepoHandle};

/// Everything one submission needs to know about where it is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub local_directory: PathBuf,
    pub identity: Identity,
    pub branch: String,
    /// Set once the fork exists.
    pub fork: Option<RepoHandle>,
}

impl Session {
    #[must_use]
    pub fn new(
        local_directory: impl Into<PathBuf>,
        identity: Identity,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            local_directory: local_directory.into(),
            identity,
            branch: branch.into(),
            fork: None,
        }
    }

    /// The same session, now pointing at `fork`.
    #[must_use]
    pub fn with_fork(self, fork: RepoHandle) -> Self {
        Self {
            fork: Some(fork),
            ..self
        }
    }
}

/// Stage of a publish run, reported before the stage starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    Authenticate,
    Fork,
    Clone,
    Sync,
    Branch,
    Edit,
    Commit,
    Push,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Authenticate => "authenticating",
            Self::Fork => "forking catalog repository",
            Self::Clone => "cloning fork",
            Self::Sync => "syncing with upstream",
            Self::Branch => "creating branch",
            Self::Edit => "adding record to catalog",
            Self::Commit => "committing",
            Self::Push => "pushing branch",
        };
        f.write_str(text)
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Session with the fork filled in.
    pub session: Session,
    /// Account the submission was made as.
    pub login: String,
    /// Page for opening the pull request.
    pub compare_url: String,
}

impl PublishOutcome {
    /// The fork the branch was pushed to.
    #[must_use]
    pub fn fork(&self) -> Option<&RepoHandle> {
        self.session.fork.as_ref()
    }
}

/// Copy `source` into `<working_copy>/<images_dir>/<image_name>` and stage it.
///
/// Returns the path of the copy.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `source` does not exist, `FsError::IoError`
/// if the copy fails, or `GitError::Transport` if staging fails.
pub fn copy_image(
    runner: &GitRunner,
    working_copy: &Path,
    images_dir: &Path,
    source: &Path,
    image_name: &str,
) -> HubResult<PathBuf> {
    if !source.is_file() {
        return Err(FsError::NotFound(source.display().to_string()).into());
    }

    let relative = images_dir.join(image_name);
    let dest = working_copy.join(&relative);
    let io_err = |path: &Path| {
        let path = path.display().to_string();
        move |source: std::io::Error| FsError::IoError { path, source }
    };

    let dest_dir = working_copy.join(images_dir);
    std::fs::create_dir_all(&dest_dir).map_err(io_err(&dest_dir))?;
    std::fs::copy(source, &dest).map_err(io_err(&dest))?;
    info!(from = %source.display(), to = %relative.display(), "copied image");

    stage(runner, working_copy, &relative)?;
    Ok(dest)
}

/// Run the full submission for `record`.
///
/// `on_step` is called before each stage starts.
///
/// # Errors
///
/// Returns the first error of any stage: `HostingError` for authentication
/// and forking, `GitError` for clone, sync, branch, commit and push,
/// `CatalogError` for the catalog edit, `FsError` for the image copy.
pub async fn publish<A, F>(
    api: &A,
    runner: &GitRunner,
    hub: &HubConfig,
    session: Session,
    record: &CatalogRecord,
    image: Option<&Path>,
    mut on_step: F,
) -> HubResult<PublishOutcome>
where
    A: HostingApi,
    F: FnMut(PublishStep),
{
    on_step(PublishStep::Authenticate);
    let user = api.authenticated_user().await?;

    on_step(PublishStep::Fork);
    let upstream = api.repository(&hub.upstream_repo).await?;
    let fork = api.create_fork(&upstream).await?;
    let session = session.with_fork(fork.clone());

    let work = session.local_directory.as_path();

    on_step(PublishStep::Clone);
    clone_fork(runner, &hub.clone_url(&fork.full_name), work)?;

    on_step(PublishStep::Sync);
    track_upstream(
        runner,
        work,
        &hub.clone_url(&hub.upstream_repo),
        &hub.main_branch,
    )?;

    on_step(PublishStep::Branch);
    create_branch(runner, work, &session.branch)?;

    on_step(PublishStep::Edit);
    match image {
        Some(source) if !record.image_file.is_empty() => {
            copy_image(runner, work, &hub.images_dir, source, &record.image_file)?;
        }
        Some(source) => {
            warn!(image = %source.display(), "record has no imageFile, image not copied");
        }
        None => {}
    }
    insert_record(work, &hub.catalog_file, record)?;

    on_step(PublishStep::Commit);
    commit_all(runner, work, &hub.commit_message)?;

    on_step(PublishStep::Push);
    push_branch(runner, work, &session.branch, &session.identity)?;

    let compare_url = hub.compare_url(&fork.full_name, &session.branch);
    info!(branch = %session.branch, url = %compare_url, "submission pushed");

    Ok(PublishOutcome {
        session,
        login: user.login,
        compare_url,
    })
}
