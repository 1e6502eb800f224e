// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command arguments.
//!
//! ```text
//! publish FILE --branch NAME
//!   [--local-dir DIR]              default: hub.local_dir
//!   [--image PATH]                 copied as the record's imageFile
//!   --token T                      env GITHUB_TOKEN
//!   | --username U --password P    env GITHUB_USERNAME / GITHUB_PASSWORD
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::HubResult;
use crate::hosting::Identity;

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    /// Record file to submit.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Branch to create for the submission (letters, digits, '_' and '-').
    #[arg(short = 'b', long, value_name = "NAME")]
    pub branch: String,

    /// Working copy of the catalog (defaults to hub.local_dir).
    #[arg(long = "local-dir", value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Image to copy into the catalog's image directory.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// GitHub credentials, from flags or the environment.
#[derive(Clone, Default, Args)]
pub struct CredentialArgs {
    /// Personal access token. Takes precedence over username and password.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub user name.
    #[arg(short = 'u', long, env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// GitHub password.
    #[arg(short = 'p', long, env = "GITHUB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialArgs")
            .field("token", &redact(&self.token))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

impl CredentialArgs {
    /// Builds the identity to publish as.
    ///
    /// # Errors
    ///
    /// Returns `HostingError::MissingCredentials` if neither a token nor a
    /// username and password were given.
    pub fn identity(&self) -> HubResult<Identity> {
        Identity::from_parts(
            self.token.clone(),
            self.username.clone(),
            self.password.clone(),
        )
    }
}
