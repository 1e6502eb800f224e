// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for mrhub-submit.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, HubConfig, AuthConfig, CitationConfig
//! ```
//!
//! # Authentication Helper
//!
//! ```text
//! AuthHelper: Environment (default) | Script
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::{LogConfig, LogLevel};

/// How credentials reach `git push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthHelper {
    /// Inline `credential.helper` reading the child's environment.
    #[default]
    Environment,
    /// Temporary `GIT_ASKPASS` script, deleted after each call.
    Script,
}

impl std::fmt::Display for AuthHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::Script => write!(f, "script"),
        }
    }
}

impl std::str::FromStr for AuthHelper {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "environment" | "env" => Ok(Self::Environment),
            "script" | "askpass" => Ok(Self::Script),
            _ => Err(ConfigError::InvalidValue {
                section: "auth".to_string(),
                key: "helper".to_string(),
                message: format!("expected 'environment' or 'script', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Print the publish plan without contacting GitHub or running git.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file (no file logging when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

impl GlobalConfig {
    /// Logging setup described by these options.
    ///
    /// CLI log flags reach this through config overrides, so the result
    /// already reflects every layer.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.output_log_level)
            .with_file_level(self.file_log_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .build()
    }
}

/// Catalog repository settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
    /// Upstream catalog repository as `owner/name`.
    pub upstream_repo: String,
    /// Branch that tracks upstream in the fork.
    pub main_branch: String,
    /// Web/git host; clone URLs are `<host_url>/<full_name>.git`.
    pub host_url: String,
    /// REST API base URL.
    pub api_url: String,
    /// Catalog JSON file, relative to the working copy.
    pub catalog_file: PathBuf,
    /// Image directory, relative to the working copy.
    pub images_dir: PathBuf,
    /// Commit message for the submission.
    pub commit_message: String,
    /// Default working copy location.
    pub local_dir: PathBuf,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            upstream_repo: "ismrm/mrhub".to_string(),
            main_branch: "master".to_string(),
            host_url: "https://github.com".to_string(),
            api_url: "https://api.github.com".to_string(),
            catalog_file: PathBuf::from("_data").join("projects.json"),
            images_dir: PathBuf::from("images_packages"),
            commit_message: "Package addition - generated by mrhub-submit".to_string(),
            local_dir: PathBuf::from("local_mrhub_repo"),
        }
    }
}

impl HubConfig {
    /// Clone URL for a repository full name (`owner/name`).
    #[must_use]
    pub fn clone_url(&self, full_name: &str) -> String {
        format!("{}/{full_name}.git", self.host_url.trim_end_matches('/'))
    }

    /// Web URL comparing `branch` against the default branch of `full_name`.
    #[must_use]
    pub fn compare_url(&self, full_name: &str, branch: &str) -> String {
        format!(
            "{}/{full_name}/compare/{branch}",
            self.host_url.trim_end_matches('/')
        )
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Credential injection mechanism for authenticated git calls.
    pub helper: AuthHelper,
}

/// Citation lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CitationConfig {
    /// Paper lookup endpoint; the search string is appended as a path segment.
    pub api_url: String,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.semanticscholar.org/graph/v1/paper".to_string(),
        }
    }
}
