// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::standard(--config files)
//!   1. mrhub.toml          (cwd, skipped if absent)   ConfigSource::Local
//!   2. --config FILE ...   (must exist)               ConfigSource::File
//!   3. MRHUB_SECTION__KEY  (environment)
//!        |
//!   .apply_overrides(CLI flags, --set)
//!        |
//!        v
//!   build() --> Config --> Config::validate()
//! ```

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Per-directory configuration file picked up automatically.
pub const LOCAL_CONFIG_FILE: &str = "mrhub.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "MRHUB";

/// One configuration layer, as listed by `mrhub inis`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Optional file that was present when the loader was built.
    Local(PathBuf),
    /// File named with `--config`.
    File(PathBuf),
    /// TOML given as a string.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "[local] {}", path.display()),
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Inline => f.write_str("[inline] <string>"),
        }
    }
}

/// Collects configuration layers; later layers win.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// A loader with no layers; [`build`](Self::build) yields the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// The layering the `mrhub` binary uses: [`LOCAL_CONFIG_FILE`], then
    /// `extra_files` in order, then `MRHUB_*` variables.
    #[must_use]
    pub fn standard<P: AsRef<Path>>(extra_files: &[P]) -> Self {
        extra_files
            .iter()
            .fold(
                Self::new().add_toml_file_optional(LOCAL_CONFIG_FILE),
                |loader, path| loader.add_toml_file(path),
            )
            .with_env_prefix(ENV_PREFIX)
    }

    /// Add a TOML file that must exist when [`build`](Self::build) runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        self.push_file(ConfigSource::File(path.clone()), &path, true)
    }

    /// Add a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let source = path.exists().then(|| ConfigSource::Local(path.clone()));
        self.push_file(source, &path, false)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    fn push_file(
        mut self,
        source: impl Into<Option<ConfigSource>>,
        path: &Path,
        required: bool,
    ) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        let source: Option<ConfigSource> = source.into();
        self.sources.extend(source);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` variables when building.
    ///
    /// The double underscore keeps keys such as `main_branch` intact.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override one dotted key (`hub.main_branch`); beats every layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key cannot be addressed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| override_error(key, &e))?;
        Ok(self)
    }

    /// Apply a batch of overrides in order, so later entries win.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first key that cannot be
    /// addressed.
    pub fn apply_overrides<I>(self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, config::Value)>,
    {
        overrides
            .into_iter()
            .try_fold(self, |loader, (key, value)| loader.set(&key, value))
    }

    /// Merge all layers, deserialize and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, a key is unknown or has the wrong type, or
    /// [`Config::validate`] rejects a value.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// File and string layers added so far, lowest priority first.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered listing of [`sources`](Self::sources).
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn override_error(key: &str, err: &config::ConfigError) -> ConfigError {
    let (section, name) = key.split_once('.').unwrap_or(("", key));
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: name.to_string(),
        message: err.to_string(),
    }
}
