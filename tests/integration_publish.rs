// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end publish runs against local bare repositories.
//!
//! ```text
//! <temp>/host/ismrm/mrhub.git   upstream (bare, has _data/projects.json)
//! <temp>/host/alice/mrhub.git   fork (bare)
//! <temp>/work                   working copy created by publish
//! ```
//!
//! The hosting service is replaced by an in-memory `HostingApi`.

use mrhub_submit::catalog::CatalogRecord;
use mrhub_submit::config::types::HubConfig;
use mrhub_submit::error::{GitError, HostingError, HubError, HubResult};
use mrhub_submit::git::runner::GitRunner;
use mrhub_submit::hosting::{HostUser, HostingApi, Identity, RepoHandle};
use mrhub_submit::workflow::{PublishStep, Session, publish};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

const CATALOG: &str = "[\n  {\n    \"name\": \"Existing\"\n  }\n]\n";

fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

struct Fixture {
    temp: TempDir,
    hub: HubConfig,
}

impl Fixture {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let seed = temp.path().join("seed");
        std::fs::create_dir_all(seed.join("_data")).unwrap();
        git(&["init", "-q", "--initial-branch=master"], &seed);
        std::fs::write(seed.join("_data").join("projects.json"), CATALOG).unwrap();
        git(&["add", "."], &seed);
        git(&["commit", "-q", "-m", "seed"], &seed);

        let host = temp.path().join("host");
        for owner in ["ismrm", "alice"] {
            std::fs::create_dir_all(host.join(owner)).unwrap();
            let bare = host.join(owner).join("mrhub.git");
            git(
                &["clone", "-q", "--bare", seed.to_str().unwrap(), bare.to_str().unwrap()],
                temp.path(),
            );
        }

        let hub = HubConfig {
            host_url: host.display().to_string(),
            ..HubConfig::default()
        };
        Self { temp, hub }
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn work(&self) -> PathBuf {
        self.path().join("work")
    }

    fn fork_dir(&self) -> PathBuf {
        self.path().join("host").join("alice").join("mrhub.git")
    }

    fn runner(&self) -> GitRunner {
        let global = self.path().join("gitconfig");
        if !global.exists() {
            std::fs::write(&global, "").unwrap();
        }
        GitRunner::new()
            .expect("git must be installed")
            .with_env("GIT_CONFIG_GLOBAL", global)
            .with_env("GIT_CONFIG_NOSYSTEM", "1")
            .with_env("GIT_AUTHOR_NAME", "Test")
            .with_env("GIT_AUTHOR_EMAIL", "test@example.com")
            .with_env("GIT_COMMITTER_NAME", "Test")
            .with_env("GIT_COMMITTER_EMAIL", "test@example.com")
    }

    fn session(&self, branch: &str) -> Session {
        Session::new(self.work(), Identity::Token("t0ken".to_string()), branch)
    }

    /// File content on `branch` of the fork.
    fn fork_file(&self, branch: &str, file: &str) -> String {
        git(&["show", &format!("{branch}:{file}")], &self.fork_dir())
    }
}

/// In-memory hosting service that forks `upstream` into `login`'s account.
struct FakeHost {
    hub: HubConfig,
    login: String,
    reject: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeHost {
    fn new(hub: &HubConfig) -> Self {
        Self {
            hub: hub.clone(),
            login: "alice".to_string(),
            reject: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(hub: &HubConfig) -> Self {
        Self {
            reject: true,
            ..Self::new(hub)
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn handle(&self, full_name: &str) -> RepoHandle {
        RepoHandle {
            full_name: full_name.to_string(),
            clone_url: self.hub.clone_url(full_name),
        }
    }
}

impl HostingApi for FakeHost {
    async fn authenticated_user(&self) -> HubResult<HostUser> {
        self.record("user".to_string());
        if self.reject {
            return Err(HostingError::Authentication {
                message: "401 (Bad credentials)".to_string(),
            }
            .into());
        }
        Ok(HostUser {
            login: self.login.clone(),
        })
    }

    async fn repository(&self, full_name: &str) -> HubResult<RepoHandle> {
        self.record(format!("repo {full_name}"));
        Ok(self.handle(full_name))
    }

    async fn create_fork(&self, repo: &RepoHandle) -> HubResult<RepoHandle> {
        self.record(format!("fork {}", repo.full_name));
        let name = repo.full_name.rsplit('/').next().unwrap_or_default();
        Ok(self.handle(&format!("{}/{name}", self.login)))
    }
}

fn tool_record() -> CatalogRecord {
    CatalogRecord {
        name: "Tool".to_string(),
        category: "Analysis".to_string(),
        keywords: vec!["mri".to_string()],
        ..CatalogRecord::default()
    }
}

#[tokio::test]
async fn publish_pushes_record_to_fork() {
    let fixture = Fixture::new();
    let api = FakeHost::new(&fixture.hub);
    let mut steps = Vec::new();

    let outcome = publish(
        &api,
        &fixture.runner(),
        &fixture.hub,
        fixture.session("add-tool"),
        &tool_record(),
        None,
        |step| steps.push(step),
    )
    .await
    .unwrap();

    assert_eq!(outcome.login, "alice");
    assert_eq!(outcome.fork().unwrap().full_name, "alice/mrhub");
    assert_eq!(
        outcome.compare_url,
        format!("{}/alice/mrhub/compare/add-tool", fixture.hub.host_url)
    );
    assert_eq!(
        steps,
        vec![
            PublishStep::Authenticate,
            PublishStep::Fork,
            PublishStep::Clone,
            PublishStep::Sync,
            PublishStep::Branch,
            PublishStep::Edit,
            PublishStep::Commit,
            PublishStep::Push,
        ]
    );
    assert_eq!(api.calls(), vec!["user", "repo ismrm/mrhub", "fork ismrm/mrhub"]);

    let catalog = fixture.fork_file("add-tool", "_data/projects.json");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&catalog).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["name"], "Tool");
    assert_eq!(parsed[1]["name"], "Existing");

    // master on the fork is untouched
    assert_eq!(fixture.fork_file("master", "_data/projects.json"), CATALOG);
}

#[tokio::test]
async fn publish_copies_image() {
    let fixture = Fixture::new();
    let api = FakeHost::new(&fixture.hub);
    let image = fixture.path().join("logo.png");
    std::fs::write(&image, b"\x89PNG fake").unwrap();

    let record = CatalogRecord {
        image_file: "tool.png".to_string(),
        ..tool_record()
    };
    publish(
        &api,
        &fixture.runner(),
        &fixture.hub,
        fixture.session("add-tool"),
        &record,
        Some(&image),
        |_| {},
    )
    .await
    .unwrap();

    let files = git(&["ls-tree", "-r", "--name-only", "add-tool"], &fixture.fork_dir());
    assert!(files.lines().any(|f| f == "images_packages/tool.png"));
}

#[tokio::test]
async fn publish_existing_branch_leaves_catalog_untouched() {
    let fixture = Fixture::new();
    let api = FakeHost::new(&fixture.hub);
    let runner = fixture.runner();

    publish(
        &api,
        &runner,
        &fixture.hub,
        fixture.session("add-tool"),
        &tool_record(),
        None,
        |_| {},
    )
    .await
    .unwrap();

    let mut steps = Vec::new();
    let err = publish(
        &api,
        &runner,
        &fixture.hub,
        fixture.session("add-tool"),
        &tool_record(),
        None,
        |step| steps.push(step),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.as_git(), Some(GitError::BranchExists { branch }) if branch == "add-tool"));
    assert_eq!(steps.last(), Some(&PublishStep::Branch));

    let catalog = std::fs::read_to_string(fixture.work().join("_data/projects.json")).unwrap();
    assert_eq!(catalog, CATALOG);
}

#[tokio::test]
async fn publish_rejected_credentials_stop_before_clone() {
    let fixture = Fixture::new();
    let api = FakeHost::rejecting(&fixture.hub);
    let mut steps = Vec::new();

    let err = publish(
        &api,
        &fixture.runner(),
        &fixture.hub,
        fixture.session("add-tool"),
        &tool_record(),
        None,
        |step| steps.push(step),
    )
    .await
    .unwrap_err();

    match err {
        HubError::Hosting(boxed) => {
            assert!(matches!(*boxed, HostingError::Authentication { .. }));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert_eq!(steps, vec![PublishStep::Authenticate]);
    assert_eq!(api.calls(), vec!["user"]);
    assert!(!fixture.work().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn publish_push_rejection_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = Fixture::new();
    let hook = fixture.fork_dir().join("hooks").join("pre-receive");
    std::fs::create_dir_all(hook.parent().unwrap()).unwrap();
    std::fs::write(&hook, "#!/bin/sh\necho 'rejected by policy' >&2\nexit 1\n").unwrap();
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755)).unwrap();

    let api = FakeHost::new(&fixture.hub);
    let err = publish(
        &api,
        &fixture.runner(),
        &fixture.hub,
        fixture.session("add-tool"),
        &tool_record(),
        None,
        |_| {},
    )
    .await
    .unwrap_err();

    match err.as_git() {
        Some(GitError::PushFailed { branch, stderr }) => {
            assert_eq!(branch, "add-tool");
            assert!(stderr.contains("rejected by policy"), "stderr: {stderr}");
        }
        other => panic!("expected push failure, got {other:?}"),
    }

    // the commit exists locally even though the push failed
    let log = git(&["log", "--format=%s", "-1", "add-tool"], &fixture.work());
    assert_eq!(log.trim(), fixture.hub.commit_message);
}
