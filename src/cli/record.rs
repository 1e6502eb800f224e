// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record command arguments.
//!
//! # Subcommands
//!
//! ```text
//! record new FILE [fields]           → blank form + fields, saved to FILE
//! record edit FILE [fields] [--remove-* N]
//!                                    → FILE loaded into the form, edited, saved
//! record show FILE                   → block that publish would insert
//! ```
//!
//! List values are pairs written as `TEXT|URL`; the last `|` splits them.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::catalog::form::FormEdits;

/// Arguments for the `record` command.
#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    /// Record subcommand.
    #[command(subcommand)]
    pub subcommand: RecordSubcommand,
}

/// Record subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RecordSubcommand {
    /// Creates a new record file.
    New(RecordNewArgs),

    /// Changes fields of an existing record file.
    Edit(RecordEditArgs),

    /// Prints the catalog entry a record file produces.
    Show(RecordShowArgs),
}

/// Arguments for `record new`.
#[derive(Debug, Clone, Args)]
pub struct RecordNewArgs {
    /// Record file to create.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Overwrites FILE if it already exists.
    #[arg(short = 'f', long)]
    pub force: bool,

    #[command(flatten)]
    pub fields: RecordFieldArgs,
}

/// Arguments for `record edit`.
#[derive(Debug, Clone, Args)]
pub struct RecordEditArgs {
    /// Record file to change in place.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub fields: RecordFieldArgs,

    /// Removes keyword row N (1-based). Can be repeated.
    #[arg(long = "remove-keyword", value_name = "N", action = clap::ArgAction::Append)]
    pub remove_keywords: Vec<usize>,

    /// Removes reference row N (1-based). Can be repeated.
    #[arg(long = "remove-reference", value_name = "N", action = clap::ArgAction::Append)]
    pub remove_references: Vec<usize>,

    /// Removes resource row N (1-based). Can be repeated.
    #[arg(long = "remove-resource", value_name = "N", action = clap::ArgAction::Append)]
    pub remove_resources: Vec<usize>,
}

/// Arguments for `record show`.
#[derive(Debug, Clone, Args)]
pub struct RecordShowArgs {
    /// Record file to preview.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Field values shared by `record new` and `record edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct RecordFieldArgs {
    /// Package name.
    #[arg(long)]
    pub name: Option<String>,

    /// Catalog category (e.g. Reconstruction, Analysis).
    #[arg(long)]
    pub category: Option<String>,

    /// One-line description.
    #[arg(long = "short-description", value_name = "TEXT")]
    pub short_description: Option<String>,

    /// Image file name, as stored under the catalog's image directory.
    #[arg(long = "image-file", value_name = "NAME")]
    pub image_file: Option<String>,

    /// Project home page.
    #[arg(long = "main-url", value_name = "URL")]
    pub main_url: Option<String>,

    /// Source repository.
    #[arg(long = "repo-url", value_name = "URL")]
    pub repo_url: Option<String>,

    /// Principal developers.
    #[arg(long, value_name = "NAMES")]
    pub developers: Option<String>,

    /// Long description.
    #[arg(long = "long-description", value_name = "TEXT")]
    pub long_description: Option<String>,

    /// Date the package was added to the catalog.
    #[arg(long = "date-added", value_name = "DATE")]
    pub date_added: Option<String>,

    /// Date the software was last updated.
    #[arg(long = "date-updated", value_name = "DATE")]
    pub date_updated: Option<String>,

    /// Citation search string (DOI:..., arXiv:..., or a paper id).
    #[arg(long = "citation-search", value_name = "QUERY")]
    pub citation_search: Option<String>,

    /// Appends a keyword. Can be repeated.
    #[arg(long = "keyword", value_name = "KEYWORD", action = clap::ArgAction::Append)]
    pub keywords: Vec<String>,

    /// Appends a key reference as 'TEXT|URL'. Can be repeated.
    #[arg(long = "reference", value_name = "TEXT|URL", action = clap::ArgAction::Append,
          value_parser = parse_pair)]
    pub references: Vec<(String, String)>,

    /// Appends an extra resource as 'TYPE|URL'. Can be repeated.
    #[arg(long = "resource", value_name = "TYPE|URL", action = clap::ArgAction::Append,
          value_parser = parse_pair)]
    pub resources: Vec<(String, String)>,
}

/// Split `TEXT|URL` at the last `|`. A value without `|` has an empty URL.
///
/// # Errors
///
/// Returns an error message if the text part is empty.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (text, url) = s.rsplit_once('|').unwrap_or((s, ""));
    if text.trim().is_empty() {
        return Err(format!("expected TEXT|URL, got '{s}'"));
    }
    Ok((text.trim().to_string(), url.trim().to_string()))
}

impl RecordFieldArgs {
    /// Converts the field flags into form edits.
    #[must_use]
    pub fn to_edits(&self) -> FormEdits {
        FormEdits {
            name: self.name.clone(),
            category: self.category.clone(),
            short_description: self.short_description.clone(),
            image_file: self.image_file.clone(),
            main_url: self.main_url.clone(),
            repo_url: self.repo_url.clone(),
            principal_developers: self.developers.clone(),
            long_description: self.long_description.clone(),
            date_added: self.date_added.clone(),
            date_updated: self.date_updated.clone(),
            citation_search_string: self.citation_search.clone(),
            keywords: self.keywords.clone(),
            references: self.references.clone(),
            resources: self.resources.clone(),
            ..FormEdits::default()
        }
    }
}

impl RecordEditArgs {
    /// Converts field flags and row removals into form edits.
    #[must_use]
    pub fn to_edits(&self) -> FormEdits {
        FormEdits {
            remove_keywords: self.remove_keywords.clone(),
            remove_references: self.remove_references.clone(),
            remove_resources: self.remove_resources.clone(),
            ..self.fields.to_edits()
        }
    }
}
