// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mrhub-submit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. mrhub.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. MRHUB_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! Sections and keys are separated by a double underscore so that keys
//! containing `_` stay unambiguous.
//!
//! ```text
//! MRHUB_GLOBAL__DRY=true           → global.dry = true
//! MRHUB_HUB__MAIN_BRANCH=main      → hub.main_branch = "main"
//! MRHUB_AUTH__HELPER=script        → auth.helper = "script"
//! ```
//!
//! Credentials are never part of the configuration; they are read from the
//! command line or `GITHUB_*` variables for the lifetime of one command.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{AuthConfig, CitationConfig, GlobalConfig, HubConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Catalog repository settings.
    pub hub: HubConfig,
    /// Authentication helper settings.
    pub auth: AuthConfig,
    /// Citation lookup settings.
    pub citation: CitationConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mrhub_submit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("mrhub.toml")
    ///     .with_env_prefix("MRHUB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the upstream repository is not
    /// of the form `owner/name` or a required string is empty.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            section: "hub".to_string(),
            key: key.to_string(),
            message,
        };

        let valid_repo = self
            .hub
            .upstream_repo
            .split_once('/')
            .is_some_and(|(owner, name)| {
                !owner.is_empty() && !name.is_empty() && !name.contains('/')
            });
        if !valid_repo {
            return Err(invalid(
                "upstream_repo",
                format!("expected 'owner/name', got '{}'", self.hub.upstream_repo),
            ));
        }

        for (key, value) in [
            ("main_branch", &self.hub.main_branch),
            ("host_url", &self.hub.host_url),
            ("api_url", &self.hub.api_url),
            ("commit_message", &self.hub.commit_message),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(key, "must not be empty".to_string()));
            }
        }

        if self.hub.catalog_file.as_os_str().is_empty() {
            return Err(invalid("catalog_file", "must not be empty".to_string()));
        }

        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_hub_options(&mut options);
        options.insert("auth.helper".into(), self.auth.helper.to_string());
        options.insert("citation.api_url".into(), self.citation.api_url.clone());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_hub_options(&self, options: &mut BTreeMap<String, String>) {
        let hub = &self.hub;
        options.insert("hub.upstream_repo".into(), hub.upstream_repo.clone());
        options.insert("hub.main_branch".into(), hub.main_branch.clone());
        options.insert("hub.host_url".into(), hub.host_url.clone());
        options.insert("hub.api_url".into(), hub.api_url.clone());
        options.insert(
            "hub.catalog_file".into(),
            hub.catalog_file.display().to_string(),
        );
        options.insert(
            "hub.images_dir".into(),
            hub.images_dir.display().to_string(),
        );
        options.insert("hub.commit_message".into(), hub.commit_message.clone());
        options.insert("hub.local_dir".into(), hub.local_dir.display().to_string());
    }
}
