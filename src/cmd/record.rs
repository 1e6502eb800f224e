// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record command: create, edit and preview record files.
//!
//! ```text
//! new   RecordForm::default() --apply--> to_record() --> save
//! edit  load --> RecordForm::from_record() --apply--> to_record() --> save
//! show  load --> render_block() --> stdout
//! ```

use anyhow::Context;
use tracing::info;

use crate::catalog::CatalogRecord;
use crate::catalog::form::{FormEdits, RecordForm};
use crate::catalog::insert::render_block;
use crate::cli::record::{RecordArgs, RecordSubcommand};
use crate::error::Result;
use std::path::Path;

/// Main handler for the record command.
///
/// # Errors
///
/// Returns an error if a record file cannot be read or written, or an edit
/// names a row that does not exist.
pub fn run_record_command(args: &RecordArgs) -> Result<()> {
    match &args.subcommand {
        RecordSubcommand::New(new) => {
            if new.file.exists() && !new.force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite, or `record edit`)",
                    new.file.display()
                );
            }
            let record = edit_record(&CatalogRecord::default(), &new.fields.to_edits())?;
            save(&record, &new.file)
        }
        RecordSubcommand::Edit(edit) => {
            let current = CatalogRecord::load(&edit.file)?;
            let record = edit_record(&current, &edit.to_edits())?;
            save(&record, &edit.file)
        }
        RecordSubcommand::Show(show) => {
            let record = CatalogRecord::load(&show.file)?;
            for line in render_block(&record)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Apply `edits` to `record` through the form model.
///
/// # Errors
///
/// Returns an error if an edit removes a row that does not exist.
pub fn edit_record(record: &CatalogRecord, edits: &FormEdits) -> Result<CatalogRecord> {
    let mut form = RecordForm::from_record(record);
    form.apply(edits).context("invalid record edit")?;
    Ok(form.to_record())
}

fn save(record: &CatalogRecord, path: &Path) -> Result<()> {
    record.save(path)?;
    info!(file = %path.display(), name = %record.name, "record saved");
    Ok(())
}
