// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Citation command: show which paper a search string resolves to.

use anyhow::Context;

use crate::catalog::CatalogRecord;
use crate::cli::citation::CitationArgs;
use crate::config::Config;
use crate::error::Result;
use crate::net::CitationClient;

/// Look up the paper for a query or a record's citation search string.
///
/// # Errors
///
/// Returns an error if the record cannot be loaded, has no search string, or
/// the lookup fails.
pub async fn run_citation_command(args: &CitationArgs, config: &Config) -> Result<()> {
    let query = match (&args.query, &args.record) {
        (Some(query), _) => query.clone(),
        (None, Some(path)) => CatalogRecord::load(path)?.citation_search_string,
        (None, None) => anyhow::bail!("no citation search string given"),
    };
    if query.trim().is_empty() {
        anyhow::bail!("citation search string is empty");
    }

    let client = CitationClient::new(&config.citation.api_url);
    let paper = client
        .lookup(&query)
        .await
        .with_context(|| format!("citation lookup for '{query}' failed"))?;

    println!("{}", paper.title);
    Ok(())
}
