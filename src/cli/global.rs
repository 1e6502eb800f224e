// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --dry             ← Print what publish/clean would do
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --set KEY=VAL     ← Direct config override (hub.main_branch=main)
//!
//! Precedence: CLI flags > --set > MRHUB_* env > --config > mrhub.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Prints the steps of `publish` and `clean` without running them.
    #[arg(long, global = true)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
          value_parser = clap::value_parser!(u8).range(0..=6))]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true,
          value_parser = clap::value_parser!(u8).range(0..=6))]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Sets an option, such as 'hub.main_branch=main'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append,
          value_parser = parse_set, global = true)]
    pub options: Vec<(String, String)>,
}

fn parse_set(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    ///
    /// `--set` values come first so the dedicated flags win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, config::Value)> {
        let mut overrides: Vec<(String, config::Value)> = self
            .options
            .iter()
            .map(|(key, value)| (key.clone(), config::Value::from(value.as_str())))
            .collect();

        if let Some(level) = self.log_level {
            overrides.push((
                "global.output_log_level".to_string(),
                i64::from(level).into(),
            ));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".to_string(), i64::from(level).into()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push((
                "global.log_file".to_string(),
                path.display().to_string().into(),
            ));
        }

        if self.dry {
            overrides.push(("global.dry".to_string(), true.into()));
        }

        overrides
    }
}
