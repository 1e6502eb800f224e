// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the GitHub client using wiremock.

use mrhub_submit::error::{HostingError, HubError};
use mrhub_submit::hosting::{GitHubClient, HostingApi, Identity, RepoHandle};
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(server.uri(), Identity::Token("t0ken".to_string())).unwrap()
}

fn expect_hosting(err: HubError) -> HostingError {
    match err {
        HubError::Hosting(boxed) => *boxed,
        other => panic!("expected HubError::Hosting, got {other:?}"),
    }
}

#[tokio::test]
async fn authenticated_user_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(bearer_token("t0ken"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "alice", "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let user = token_client(&server).authenticated_user().await.unwrap();
    assert_eq!(user.login, "alice");
}

#[tokio::test]
async fn authenticated_user_sends_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(basic_auth("alice", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "alice" })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = Identity::UserPassword {
        username: "alice".to_string(),
        password: "hunter2".to_string(),
    };
    // trailing slash on the base URL is tolerated
    let client = GitHubClient::new(format!("{}/", server.uri()), identity).unwrap();
    let user = client.authenticated_user().await.unwrap();
    assert_eq!(user.login, "alice");
}

#[tokio::test]
async fn bad_credentials_are_authentication_errors() {
    for status in [401, 403] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;

        let err = token_client(&server).authenticated_user().await.unwrap_err();
        match expect_hosting(err) {
            HostingError::Authentication { message } => {
                assert_eq!(message, format!("{status} (Bad credentials)"));
            }
            other => panic!("expected Authentication for {status}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn fork_looks_up_repository_then_forks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/ismrm/mrhub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "ismrm/mrhub",
            "clone_url": "https://github.com/ismrm/mrhub.git",
            "private": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/ismrm/mrhub/forks"))
        .and(bearer_token("t0ken"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "full_name": "alice/mrhub",
            "clone_url": "https://github.com/alice/mrhub.git"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server);
    let upstream = client.repository("ismrm/mrhub").await.unwrap();
    assert_eq!(
        upstream,
        RepoHandle {
            full_name: "ismrm/mrhub".to_string(),
            clone_url: "https://github.com/ismrm/mrhub.git".to_string(),
        }
    );

    let fork = client.create_fork(&upstream).await.unwrap();
    assert_eq!(fork.full_name, "alice/mrhub");
    assert_eq!(fork.clone_url, "https://github.com/alice/mrhub.git");
}

#[tokio::test]
async fn missing_repository_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/ismrm/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = token_client(&server)
        .repository("ismrm/missing")
        .await
        .unwrap_err();
    match expect_hosting(err) {
        HostingError::HttpError { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/repos/ismrm/missing"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[test]
fn empty_identity_is_rejected_before_any_request() {
    let err = GitHubClient::new("http://127.0.0.1:9", Identity::Token("  ".to_string()))
        .unwrap_err();
    assert!(matches!(
        expect_hosting(err),
        HostingError::MissingCredentials(field) if field == "token"
    ));
}
