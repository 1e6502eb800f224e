// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git hosting service access.
//!
//! ```text
//! Identity ---------------------------> CredentialProvider (git push)
//!    |
//!    v
//! HostingApi (trait)
//!   authenticated_user()      GET  /user
//!   repository(full_name)     GET  /repos/{owner}/{repo}
//!   create_fork(&RepoHandle)  POST /repos/{owner}/{repo}/forks
//!    |
//!    v
//! GitHubClient (reqwest)
//! ```
//!
//! # Key Types
//!
//! | Type         | Purpose                              |
//! |--------------|--------------------------------------|
//! | `Identity`   | username+password or access token    |
//! | `HostUser`   | the authenticated account            |
//! | `RepoHandle` | repository `full_name` + `clone_url` |

pub mod github;

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::{HostingError, HubResult};
use crate::git::credentials::CredentialProvider;

pub use github::GitHubClient;

/// Git username sent alongside an access token.
pub const TOKEN_USERNAME: &str = "x-access-token";

/// Who the tool acts as.
#[derive(Clone, PartialEq, Eq)]
pub enum Identity {
    UserPassword { username: String, password: String },
    Token(String),
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserPassword { username, .. } => f
                .debug_struct("UserPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
        }
    }
}

impl Identity {
    /// Pick an identity from optional CLI/environment values.
    ///
    /// A non-empty token wins; otherwise username and password are required.
    ///
    /// # Errors
    ///
    /// Returns `HostingError::MissingCredentials` if neither a token nor a
    /// complete username/password pair is available.
    pub fn from_parts(
        token: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> HubResult<Self> {
        let identity = match (token.filter(|t| !t.is_empty()), username, password) {
            (Some(token), _, _) => Self::Token(token),
            (None, Some(username), Some(password)) => Self::UserPassword { username, password },
            (None, Some(_), None) => {
                return Err(HostingError::MissingCredentials("password".to_string()).into());
            }
            (None, None, _) => {
                return Err(
                    HostingError::MissingCredentials("token or username".to_string()).into(),
                );
            }
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Reject empty usernames, passwords and tokens.
    ///
    /// # Errors
    ///
    /// Returns `HostingError::MissingCredentials` naming the empty field.
    pub fn validate(&self) -> HubResult<()> {
        let empty = match self {
            Self::UserPassword { username, .. } if username.trim().is_empty() => Some("username"),
            Self::UserPassword { password, .. } if password.is_empty() => Some("password"),
            Self::Token(token) if token.trim().is_empty() => Some("token"),
            _ => None,
        };
        match empty {
            Some(field) => Err(HostingError::MissingCredentials(field.to_string()).into()),
            None => Ok(()),
        }
    }
}

impl CredentialProvider for Identity {
    fn username(&self) -> &str {
        match self {
            Self::UserPassword { username, .. } => username,
            Self::Token(_) => TOKEN_USERNAME,
        }
    }

    fn secret(&self) -> &str {
        match self {
            Self::UserPassword { password, .. } => password,
            Self::Token(token) => token,
        }
    }
}

/// The account behind an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    pub login: String,
}

/// A repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoHandle {
    /// `owner/name`.
    pub full_name: String,
    pub clone_url: String,
}

/// Operations the submission workflow needs from the hosting service.
pub trait HostingApi {
    /// Verify the identity and return the account it belongs to.
    fn authenticated_user(&self) -> impl Future<Output = HubResult<HostUser>> + Send;

    /// Look up a repository by `owner/name`.
    fn repository(&self, full_name: &str) -> impl Future<Output = HubResult<RepoHandle>> + Send;

    /// Fork `repo` into the authenticated account.
    ///
    /// Forking an already forked repository returns the existing fork.
    fn create_fork(&self, repo: &RepoHandle) -> impl Future<Output = HubResult<RepoHandle>> + Send;
}
