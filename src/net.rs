// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP plumbing and the citation lookup.
//!
//! ```text
//! global_client()  OnceLock<reqwest::Client>, shared by GitHubClient
//!                  and CitationClient (connection pool, keep-alive)
//!
//! CitationClient::new(api_url)
//!   .lookup(query)
//!        |
//!        v
//!   GET <api_url>/<query, percent-encoded per segment>?fields=title
//!     200 -> Paper { paper_id, title }
//!     404 -> NetworkError::PaperNotFound
//!     *   -> NetworkError::HttpError
//! ```

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{HubResult, NetworkError};

/// Global HTTP client - initialized once, reused across all requests.
/// Falls back to a basic client if custom configuration fails.
pub(crate) fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("mrhub-submit/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// A paper matched by the citation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Paper {
    #[serde(rename = "paperId", default)]
    pub paper_id: String,
    #[serde(default)]
    pub title: String,
}

/// Looks up papers by DOI, arXiv id or other search string.
#[derive(Debug, Clone)]
pub struct CitationClient {
    client: Client,
    api_url: String,
}

impl CitationClient {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: global_client().clone(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Find the paper for `query`.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::PaperNotFound` if the service has no match,
    /// `NetworkError::HttpError` for any other failure status, or
    /// `NetworkError::Reqwest` if the request or response body fails.
    pub async fn lookup(&self, query: &str) -> HubResult<Paper> {
        let query = query.trim();
        if query.is_empty() {
            return Err(NetworkError::PaperNotFound {
                query: String::new(),
            }
            .into());
        }

        let url = self.lookup_url(query)?;
        debug!(url = %url, "citation lookup");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        match response.status() {
            status if status.is_success() => {
                Ok(response.json::<Paper>().await.map_err(NetworkError::Reqwest)?)
            }
            StatusCode::NOT_FOUND => Err(NetworkError::PaperNotFound {
                query: query.to_string(),
            }
            .into()),
            status => Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into()),
        }
    }

    /// `<api_url>/<query>?fields=title`. Slashes in `query` (DOIs) stay path
    /// separators; everything else that is not path-safe is escaped.
    fn lookup_url(&self, query: &str) -> HubResult<Url> {
        let invalid = |message: String| NetworkError::InvalidUrl {
            url: self.api_url.clone(),
            message,
        };
        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(query.split('/'));
        url.query_pairs_mut().append_pair("fields", "title");
        Ok(url)
    }
}
