// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text-level insertion of a record into the catalog array.
//!
//! ```text
//! line k     [                     <- anchor (first line that trims to "[")
//! line k+1     {                   <- inserted, indented by two spaces
//!  ...           "name": "Tool",
//!  ...         },
//! line k+n     { ...existing...    <- untouched
//! ```
//!
//! The rest of the file is never parsed or re-serialized, so its formatting
//! survives byte for byte.

use std::path::Path;
use tracing::debug;

use super::record::CatalogRecord;
use crate::error::{CatalogError, HubResult};

const INDENT: &str = "  ";

/// Index of the first line whose trimmed content is exactly `[`.
#[must_use]
pub fn find_anchor<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    lines.iter().position(|line| line.as_ref().trim() == "[")
}

/// Render the record as it is inserted: indented, with a trailing comma.
///
/// # Errors
///
/// Returns a `CatalogError::Json` if the record cannot be serialized.
pub fn render_block(record: &CatalogRecord) -> HubResult<Vec<String>> {
    let mut json = record.to_pretty_json()?;
    json.push(',');
    Ok(json.lines().map(|line| format!("{INDENT}{line}")).collect())
}

/// Insert `record` after the anchor line of `lines`.
///
/// Each element of `lines` is one line including its terminator, as produced
/// by [`str::split_inclusive`]. Inserted lines reuse the anchor's terminator.
/// Returns the index of the anchor line.
///
/// # Errors
///
/// Returns `CatalogError::Malformed` if no anchor line exists, naming
/// `source_name` in the message.
pub fn insert_into_lines(
    lines: &mut Vec<String>,
    record: &CatalogRecord,
    source_name: &str,
) -> HubResult<usize> {
    let anchor = find_anchor(lines.as_slice()).ok_or_else(|| CatalogError::Malformed {
        path: source_name.to_string(),
    })?;

    let terminator = if lines[anchor].ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    };
    // An anchor on the last line without a newline still needs one before the block.
    if !lines[anchor].ends_with('\n') {
        lines[anchor].push_str(terminator);
    }

    let block = render_block(record)?
        .into_iter()
        .map(|line| line + terminator);
    lines.splice(anchor + 1..anchor + 1, block);

    Ok(anchor)
}

/// Insert `record` into the catalog file at `working_copy/catalog_file`.
///
/// # Errors
///
/// Returns a `CatalogError` if the file cannot be read or written, or has no
/// anchor line.
pub fn insert_record(
    working_copy: &Path,
    catalog_file: &Path,
    record: &CatalogRecord,
) -> HubResult<()> {
    let path = working_copy.join(catalog_file);
    let io_err = |source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    };

    let content = std::fs::read_to_string(&path).map_err(io_err)?;
    let mut lines: Vec<String> = content.split_inclusive('\n').map(String::from).collect();

    let anchor = insert_into_lines(&mut lines, record, &path.display().to_string())?;
    debug!(
        file = %path.display(),
        line = anchor + 1,
        record = %record.name,
        "inserted record after array opening"
    );

    std::fs::write(&path, lines.concat()).map_err(io_err)?;
    Ok(())
}
