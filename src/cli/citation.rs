// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Citation command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `citation` command.
#[derive(Debug, Clone, Args)]
pub struct CitationArgs {
    /// Search string, e.g. 'DOI:10.1002/mrm.12345' or 'arXiv:2101.00001'.
    #[arg(value_name = "QUERY", required_unless_present = "record", conflicts_with = "record")]
    pub query: Option<String>,

    /// Uses the citationSearchString of this record file.
    #[arg(short = 'r', long, value_name = "FILE")]
    pub record: Option<PathBuf>,
}
