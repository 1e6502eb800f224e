// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 HubError (~24 bytes)
//!                        |
//!   +------+-------+-----+----+------+------+----+----+
//!   |      |       |          |      |      |    |    |
//!   v      v       v          v      v      v    v    v
//!  Git  Hosting Catalog Credential Cfg  Proc  Net  Fs  Io/Other
//!  Box    Box     Box       Box     Box  Box   Box  Box Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git        Transport, CloneFailed, BranchExists, PushFailed, Gix
//!   Hosting    Authentication, MissingCredentials, HttpError, Reqwest
//!   Catalog    Malformed, Json, Io
//!   Credential UnsupportedPlatform, HelperSetup
//!   Config     InvalidValue
//!   Process    ExecutableNotFound, SpawnFailed
//!   Network    PaperNotFound, HttpError, InvalidUrl, Reqwest
//!   Fs         NotFound, IoError
//!
//! All variants boxed => HubError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HubError`].
pub type HubResult<T> = std::result::Result<T, HubError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum HubError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Hosting service (GitHub) API call failed.
    #[error("hosting error: {0}")]
    Hosting(#[from] Box<HostingError>),

    /// Catalog file or record error.
    #[error("catalog error: {0}")]
    Catalog(#[from] Box<CatalogError>),

    /// Credential helper error.
    #[error("credential error: {0}")]
    Credential(#[from] Box<CredentialError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl HubError {
    /// Create a [`HubError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }

    /// Returns the inner [`GitError`], if this is a git failure.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for HubError {
                fn from(err: $error) -> Self {
                    HubError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    HostingError => Hosting,
    CatalogError => Catalog,
    CredentialError => Credential,
    ConfigError => Config,
    ProcessError => Process,
    NetworkError => Network,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// A git command exited with a non-zero status.
    #[error("git command failed: {command} (exit code {code}): {stderr}")]
    Transport {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// The branch to create already exists in the working copy.
    #[error("branch already exists: {branch}")]
    BranchExists { branch: String },

    /// Branch name rejected before reaching git.
    #[error("invalid branch name '{branch}': only letters, digits, '_' and '-' are allowed")]
    InvalidBranchName { branch: String },

    /// HEAD is not on the branch the workflow just created.
    #[error("expected to be on branch '{expected}', found {found}")]
    UnexpectedBranch { expected: String, found: String },

    /// Pushing the submission branch was rejected.
    #[error("failed to push branch {branch}: {stderr}")]
    PushFailed { branch: String, stderr: String },

    /// `user.name` or `user.email` is not configured.
    #[error(
        "git identity not configured: '{key}' is unset \
         (run: git config --global {key} <value>)"
    )]
    IdentityNotConfigured { key: String },

    /// Refused to operate on a directory that is not a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Hosting Errors ---

/// Hosting service (GitHub REST API) errors.
#[derive(Debug, Error)]
pub enum HostingError {
    /// The supplied identity was rejected.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Credentials were empty or incomplete.
    #[error("credentials cannot be empty: {0}")]
    MissingCredentials(String),

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// A configured service URL cannot carry a path.
    #[error("invalid service url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

// --- Catalog Errors ---

/// Catalog file and record errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No line consisting of a lone `[` was found.
    #[error("malformed catalog file {path}: no line opening the JSON array")]
    Malformed { path: String },

    /// Record could not be (de)serialized.
    #[error("invalid record JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog or record file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Credential Errors ---

/// Authentication helper errors.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No askpass mechanism exists for this operating system.
    #[error("no authentication helper available for operating system '{os}'")]
    UnsupportedPlatform { os: String },

    /// The temporary askpass script could not be created.
    #[error("failed to set up authentication helper: {0}")]
    HelperSetup(#[source] std::io::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Network Errors ---

/// Network operation errors (citation lookup).
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The citation service has no paper for the query.
    #[error("paper not found: {query}")]
    PaperNotFound { query: String },

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// A configured service URL cannot carry a path.
    #[error("invalid service url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
