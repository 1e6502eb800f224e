// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog record model.
//!
//! JSON keys are fixed by the catalog site and must not change:
//!
//! ```text
//! name  category  shortDescription  imageFile  mainURL  repoURL
//! principalDevelopers  longDescription  keywords[]
//! keyReferences[{referenceText, referenceURL}]
//! extraResources[{resourceType, URL}]
//! dateAddedToMRHub  dateSoftwareLastUpdated  citationSearchString  citationCount
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{CatalogError, HubResult};

/// One package listing in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRecord {
    pub name: String,
    pub category: String,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    #[serde(rename = "imageFile")]
    pub image_file: String,
    #[serde(rename = "mainURL")]
    pub main_url: String,
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    #[serde(rename = "principalDevelopers")]
    pub principal_developers: String,
    #[serde(rename = "longDescription")]
    pub long_description: String,
    pub keywords: Vec<String>,
    #[serde(rename = "keyReferences")]
    pub key_references: Vec<KeyReference>,
    #[serde(rename = "extraResources")]
    pub extra_resources: Vec<ExtraResource>,
    #[serde(rename = "dateAddedToMRHub")]
    pub date_added: String,
    #[serde(rename = "dateSoftwareLastUpdated")]
    pub date_updated: String,
    #[serde(rename = "citationSearchString")]
    pub citation_search_string: String,
    /// Filled in by the catalog maintainers; stored as text.
    #[serde(rename = "citationCount", deserialize_with = "string_or_number")]
    pub citation_count: String,
}

/// A `{referenceText, referenceURL}` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyReference {
    #[serde(rename = "referenceText")]
    pub text: String,
    #[serde(rename = "referenceURL")]
    pub url: String,
}

/// A `{resourceType, URL}` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraResource {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "URL")]
    pub url: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "citationCount must be a string or number, got {other}"
        ))),
    }
}

impl CatalogRecord {
    /// Serialize with 2-space indentation, as stored in the catalog.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::Json` if serialization fails.
    pub fn to_pretty_json(&self) -> HubResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| {
            CatalogError::Json {
                path: format!("<record '{}'>", self.name),
                source,
            }
            .into()
        })
    }

    /// Load a record from a JSON file. Missing keys load as empty values.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be read or is not a JSON
    /// object matching the record shape.
    pub fn load(path: &Path) -> HubResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| {
            CatalogError::Json {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }

    /// Save the record as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be written.
    pub fn save(&self, path: &Path) -> HubResult<()> {
        let mut content = self.to_pretty_json()?;
        content.push('\n');
        std::fs::write(path, content).map_err(|source| {
            CatalogError::Io {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }
}
