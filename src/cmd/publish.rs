// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command: submit a record to the catalog.
//!
//! ```text
//! load record --> identity --> git check --> (dry? print plan)
//!                                               |
//!                                               v
//!                              workflow::publish (spinner per step)
//!                                               |
//!                                               v
//!                                  compare URL for the pull request
//! ```

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::info;

use crate::catalog::CatalogRecord;
use crate::cli::publish::PublishArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::runner::GitRunner;
use crate::git::sync::{ensure_git_identity, validate_branch_name};
use crate::hosting::GitHubClient;
use crate::workflow::{Session, publish};

/// Pre-validated spinner style for publish steps.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Main handler for the publish command.
///
/// # Errors
///
/// Returns an error if the record cannot be loaded, credentials are missing,
/// git is not set up, or any publish step fails.
pub async fn run_publish_command(args: &PublishArgs, config: &Config) -> Result<()> {
    let record = CatalogRecord::load(&args.file)?;
    validate_branch_name(&args.branch)?;
    let local_dir = args.local_dir.as_deref().unwrap_or(&config.hub.local_dir);

    if config.global.dry {
        for line in publish_plan(config, &record, &args.branch, local_dir, args.image.as_deref()) {
            println!("{line}");
        }
        return Ok(());
    }

    let identity = args
        .credentials
        .identity()
        .context("GitHub credentials required (--token, or --username and --password)")?;

    let runner = GitRunner::new()?.with_auth_helper(config.auth.helper);
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    ensure_git_identity(&runner, &cwd)?;

    let api = GitHubClient::new(&config.hub.api_url, identity.clone())?;
    let session = Session::new(local_dir, identity, &args.branch);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = publish(
        &api,
        &runner,
        &config.hub,
        session,
        &record,
        args.image.as_deref(),
        |step| spinner.set_message(step.to_string()),
    )
    .await;

    let outcome = match result {
        Ok(outcome) => {
            spinner.finish_with_message("done");
            outcome
        }
        Err(e) => {
            spinner.abandon_with_message("failed");
            return Err(e).context("publish failed");
        }
    };

    info!(login = %outcome.login, "publish complete");
    let fork = outcome.fork().map_or("fork", |f| f.full_name.as_str());
    println!("Pushed branch '{}' to {fork}", args.branch);
    println!("Open a pull request against {}:", config.hub.upstream_repo);
    println!("  {}", outcome.compare_url);
    Ok(())
}

/// Describe what publish would do, without touching anything.
#[must_use]
pub fn publish_plan(
    config: &Config,
    record: &CatalogRecord,
    branch: &str,
    local_dir: &Path,
    image: Option<&Path>,
) -> Vec<String> {
    let hub = &config.hub;
    let mut plan = vec![
        format!("dry run: would publish '{}'", record.name),
        format!("  fork      {} (via {})", hub.upstream_repo, hub.api_url),
        format!("  clone     <fork> into {}", local_dir.display()),
        format!(
            "  sync      {} from {}",
            hub.main_branch,
            hub.clone_url(&hub.upstream_repo)
        ),
        format!("  branch    {branch}"),
    ];
    match image {
        Some(image) if !record.image_file.is_empty() => plan.push(format!(
            "  image     {} -> {}",
            image.display(),
            hub.images_dir.join(&record.image_file).display()
        )),
        Some(image) => plan.push(format!(
            "  image     {} skipped (record has no imageFile)",
            image.display()
        )),
        None => {}
    }
    plan.push(format!("  insert    {}", hub.catalog_file.display()));
    plan.push(format!("  commit    \"{}\"", hub.commit_message));
    plan.push(format!(
        "  push      origin {branch} (auth: {})",
        config.auth.helper
    ));
    plan
}
