// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog records, the catalog file, and the editing form.
//!
//! ```text
//! record.rs  CatalogRecord  <-- load/save JSON record files
//! form.rs    RecordForm     <-- CLI edits, lossless round-trip
//! insert.rs  insert_record  --> _data/projects.json (text-level)
//! ```

pub mod form;
pub mod insert;
pub mod record;

pub use record::{CatalogRecord, ExtraResource, KeyReference};
