// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST API client.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{HostUser, HostingApi, Identity, RepoHandle};
use crate::error::{HostingError, HubResult};
use crate::net::global_client;

const ACCEPT: &str = "application/vnd.github.v3+json";

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// [`HostingApi`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    identity: Identity,
}

impl GitHubClient {
    /// Create a client for `api_url` (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns `HostingError::MissingCredentials` if the identity has an
    /// empty field. No request is made.
    pub fn new(api_url: impl Into<String>, identity: Identity) -> HubResult<Self> {
        identity.validate()?;
        Ok(Self {
            client: global_client().clone(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            identity,
        })
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, ACCEPT);
        match &self.identity {
            Identity::Token(token) => request.bearer_auth(token),
            Identity::UserPassword { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str) -> HubResult<T> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "GitHub API request");

        let response = self
            .request(method, &url)
            .send()
            .await
            .map_err(HostingError::Reqwest)?;
        let response = check_status(response, &url).await?;

        Ok(response.json::<T>().await.map_err(HostingError::Reqwest)?)
    }
}

async fn check_status(response: Response, url: &str) -> HubResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .map(|m| m.message)
        .unwrap_or(body);

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(HostingError::Authentication {
            message: format!("{} ({message})", status.as_u16()),
        }
        .into());
    }

    Err(HostingError::HttpError {
        status: status.as_u16(),
        url: url.to_string(),
    }
    .into())
}

impl HostingApi for GitHubClient {
    async fn authenticated_user(&self) -> HubResult<HostUser> {
        let user: HostUser = self.send(Method::GET, "/user").await?;
        info!(login = %user.login, "authenticated");
        Ok(user)
    }

    async fn repository(&self, full_name: &str) -> HubResult<RepoHandle> {
        self.send(Method::GET, &format!("/repos/{full_name}")).await
    }

    async fn create_fork(&self, repo: &RepoHandle) -> HubResult<RepoHandle> {
        let fork: RepoHandle = self
            .send(Method::POST, &format!("/repos/{}/forks", repo.full_name))
            .await?;
        info!(upstream = %repo.full_name, fork = %fork.full_name, "fork ready");
        Ok(fork)
    }
}
