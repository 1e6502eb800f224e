// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Editable form model bound to a [`CatalogRecord`].
//!
//! ```text
//! CatalogRecord --from_record--> RecordForm --to_record--> CatalogRecord
//!                                 |  text fields
//!                                 |  keywords    [Keyword]
//!                                 |  references  [Description, URL]
//!                                 |  resources   [Resource type, URL]
//!                                 v
//!                              apply(FormEdits)
//! ```
//!
//! `citationCount` has no form field and always reads back empty.

use super::record::{CatalogRecord, ExtraResource, KeyReference};
use crate::error::{HubError, HubResult};

pub const KEYWORD_COLUMNS: &[&str] = &["Keyword"];
pub const REFERENCE_COLUMNS: &[&str] = &["Description", "URL"];
pub const RESOURCE_COLUMNS: &[&str] = &["Resource type", "URL"];

/// Rows of string cells under a fixed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    header: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl TableModel {
    #[must_use]
    pub const fn new(header: &'static [&'static str]) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub const fn header(&self) -> &'static [&'static str] {
        self.header
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.header.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Set one cell. Returns `false` if the position does not exist.
    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Insert an empty row at `row`, clamped to the end of the table.
    pub fn insert_row(&mut self, row: usize) -> usize {
        let at = row.min(self.rows.len());
        self.rows.insert(at, vec![String::new(); self.header.len()]);
        at
    }

    /// Append an empty row and return its index.
    pub fn append_row(&mut self) -> usize {
        self.insert_row(self.rows.len())
    }

    /// Append a row from cell values; missing cells are empty, extra ones dropped.
    pub fn push_row<I, S>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let at = self.append_row();
        for (column, value) in values.into_iter().take(self.header.len()).enumerate() {
            self.rows[at][column] = value.into();
        }
        at
    }

    /// Remove and return the row at `row`.
    pub fn delete_row(&mut self, row: usize) -> Option<Vec<String>> {
        (row < self.rows.len()).then(|| self.rows.remove(row))
    }

    /// Replace every row.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(self.header.len(), String::new());
                r
            })
            .collect();
    }

    fn column(row: &[String], index: usize) -> String {
        row.get(index).cloned().unwrap_or_default()
    }
}

/// In-memory form holding every editable record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub image_file: String,
    pub main_url: String,
    pub repo_url: String,
    pub principal_developers: String,
    pub long_description: String,
    pub date_added: String,
    pub date_updated: String,
    pub citation_search_string: String,
    pub keywords: TableModel,
    pub references: TableModel,
    pub resources: TableModel,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            short_description: String::new(),
            image_file: String::new(),
            main_url: String::new(),
            repo_url: String::new(),
            principal_developers: String::new(),
            long_description: String::new(),
            date_added: String::new(),
            date_updated: String::new(),
            citation_search_string: String::new(),
            keywords: TableModel::new(KEYWORD_COLUMNS),
            references: TableModel::new(REFERENCE_COLUMNS),
            resources: TableModel::new(RESOURCE_COLUMNS),
        }
    }
}

impl RecordForm {
    /// Build a form populated from `record`.
    #[must_use]
    pub fn from_record(record: &CatalogRecord) -> Self {
        let mut form = Self::default();
        form.load_record(record);
        form
    }

    /// Populate every field and table from `record`.
    pub fn load_record(&mut self, record: &CatalogRecord) {
        self.name.clone_from(&record.name);
        self.category.clone_from(&record.category);
        self.short_description.clone_from(&record.short_description);
        self.image_file.clone_from(&record.image_file);
        self.main_url.clone_from(&record.main_url);
        self.repo_url.clone_from(&record.repo_url);
        self.principal_developers
            .clone_from(&record.principal_developers);
        self.long_description.clone_from(&record.long_description);
        self.date_added.clone_from(&record.date_added);
        self.date_updated.clone_from(&record.date_updated);
        self.citation_search_string
            .clone_from(&record.citation_search_string);

        self.keywords
            .set_rows(record.keywords.iter().map(|k| vec![k.clone()]).collect());
        self.references.set_rows(
            record
                .key_references
                .iter()
                .map(|r| vec![r.text.clone(), r.url.clone()])
                .collect(),
        );
        self.resources.set_rows(
            record
                .extra_resources
                .iter()
                .map(|r| vec![r.resource_type.clone(), r.url.clone()])
                .collect(),
        );
    }

    /// Read the form back into a record.
    #[must_use]
    pub fn to_record(&self) -> CatalogRecord {
        CatalogRecord {
            name: self.name.clone(),
            category: self.category.clone(),
            short_description: self.short_description.clone(),
            image_file: self.image_file.clone(),
            main_url: self.main_url.clone(),
            repo_url: self.repo_url.clone(),
            principal_developers: self.principal_developers.clone(),
            long_description: self.long_description.clone(),
            keywords: self
                .keywords
                .rows()
                .iter()
                .map(|row| TableModel::column(row, 0))
                .collect(),
            key_references: self
                .references
                .rows()
                .iter()
                .map(|row| KeyReference {
                    text: TableModel::column(row, 0),
                    url: TableModel::column(row, 1),
                })
                .collect(),
            extra_resources: self
                .resources
                .rows()
                .iter()
                .map(|row| ExtraResource {
                    resource_type: TableModel::column(row, 0),
                    url: TableModel::column(row, 1),
                })
                .collect(),
            date_added: self.date_added.clone(),
            date_updated: self.date_updated.clone(),
            citation_search_string: self.citation_search_string.clone(),
            citation_count: String::new(),
        }
    }

    /// Apply a batch of edits.
    ///
    /// Row removals use 1-based row numbers of the table as loaded and run
    /// before any additions. Field values replace the current text.
    ///
    /// # Errors
    ///
    /// Returns an error if a removal names a row that does not exist; the form
    /// is left unchanged in that case.
    pub fn apply(&mut self, edits: &FormEdits) -> HubResult<()> {
        check_rows("keyword", &self.keywords, &edits.remove_keywords)?;
        check_rows("reference", &self.references, &edits.remove_references)?;
        check_rows("resource", &self.resources, &edits.remove_resources)?;

        remove_rows(&mut self.keywords, &edits.remove_keywords);
        remove_rows(&mut self.references, &edits.remove_references);
        remove_rows(&mut self.resources, &edits.remove_resources);

        for keyword in &edits.keywords {
            self.keywords.push_row([keyword.as_str()]);
        }
        for (text, url) in &edits.references {
            self.references.push_row([text.as_str(), url.as_str()]);
        }
        for (kind, url) in &edits.resources {
            self.resources.push_row([kind.as_str(), url.as_str()]);
        }

        let fields = [
            (&mut self.name, &edits.name),
            (&mut self.category, &edits.category),
            (&mut self.short_description, &edits.short_description),
            (&mut self.image_file, &edits.image_file),
            (&mut self.main_url, &edits.main_url),
            (&mut self.repo_url, &edits.repo_url),
            (&mut self.principal_developers, &edits.principal_developers),
            (&mut self.long_description, &edits.long_description),
            (&mut self.date_added, &edits.date_added),
            (&mut self.date_updated, &edits.date_updated),
            (
                &mut self.citation_search_string,
                &edits.citation_search_string,
            ),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }

        Ok(())
    }
}

/// A batch of changes to apply to a [`RecordForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEdits {
    pub name: Option<String>,
    pub category: Option<String>,
    pub short_description: Option<String>,
    pub image_file: Option<String>,
    pub main_url: Option<String>,
    pub repo_url: Option<String>,
    pub principal_developers: Option<String>,
    pub long_description: Option<String>,
    pub date_added: Option<String>,
    pub date_updated: Option<String>,
    pub citation_search_string: Option<String>,
    pub keywords: Vec<String>,
    pub references: Vec<(String, String)>,
    pub resources: Vec<(String, String)>,
    pub remove_keywords: Vec<usize>,
    pub remove_references: Vec<usize>,
    pub remove_resources: Vec<usize>,
}

fn check_rows(kind: &str, table: &TableModel, rows: &[usize]) -> HubResult<()> {
    match rows.iter().find(|&&n| n == 0 || n > table.row_count()) {
        Some(n) => Err(HubError::other(format!(
            "no {kind} row {n} (table has {} rows)",
            table.row_count()
        ))),
        None => Ok(()),
    }
}

fn remove_rows(table: &mut TableModel, rows: &[usize]) {
    let mut indices: Vec<usize> = rows.iter().map(|n| n - 1).collect();
    indices.sort_unstable_by(|a, b| b.cmp(a));
    indices.dedup();
    for index in indices {
        table.delete_row(index);
    }
}
