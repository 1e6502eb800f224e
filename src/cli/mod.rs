// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mrhub-submit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mrhub [global options] <command>
//! version | options | inis
//! record {new|edit|show} FILE [field flags]
//! check-git
//! publish FILE --branch NAME [--local-dir DIR] [--image PATH] [credentials]
//! citation [QUERY] [--record FILE]
//! clean [--local-dir DIR]
//! ```

pub mod citation;
pub mod git;
pub mod global;
pub mod publish;
pub mod record;

#[cfg(test)]
mod tests;

use crate::cli::citation::CitationArgs;
use crate::cli::git::CleanArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::publish::PublishArgs;
use crate::cli::record::RecordArgs;
use clap::{Parser, Subcommand};

/// MR-Hub catalog submission tool
///
/// Fills out catalog records and submits them to the MR-Hub catalog.
#[derive(Debug, Parser)]
#[command(
    name = "mrhub",
    author,
    version,
    about = "MR-Hub catalog submission tool",
    long_about = "mrhub-submit Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fills out package records for the MR-Hub catalog and submits\n\
                  them as a branch on your fork of the catalog repository.\n\n\
                  Start with `mrhub record new tool.json --name ...`, check it\n\
                  with `mrhub record show tool.json`, then run\n\
                  `mrhub publish tool.json --branch add-tool`. See\n\
                  `mrhub <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  mrhub reads `mrhub.toml` from the current directory if it exists.\n\
                  Additional files can be given with --config; later files override\n\
                  earlier ones. MRHUB_<SECTION>__<KEY> environment variables override\n\
                  files, e.g. MRHUB_HUB__MAIN_BRANCH=main."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by mrhub.
    Inis,

    /// Creates, edits or previews a catalog record file.
    Record(RecordArgs),

    /// Checks that git is installed and has a user name and email.
    #[command(name = "check-git")]
    CheckGit,

    /// Forks the catalog, adds the record on a new branch and pushes it.
    Publish(PublishArgs),

    /// Looks up a paper title for a citation search string.
    Citation(CitationArgs),

    /// Deletes the local working copy of the catalog.
    Clean(CleanArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
