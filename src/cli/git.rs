// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working copy command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CleanArgs {
    /// Working copy to delete (defaults to hub.local_dir).
    #[arg(long = "local-dir", value_name = "DIR")]
    pub local_dir: Option<PathBuf>,
}
