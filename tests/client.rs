//
//  bitbucket-server-connector
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Transport-level tests for [`BitbucketServerClient`]: pagination
//! behavior, authentication headers, and error propagation, all against a
//! local mockito server.

use bitbucket_server_connector::api::{ApiError, BitbucketServerClient};
use futures::{StreamExt, TryStreamExt};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use url::Url;

/// Builds a Bitbucket Server pagination envelope around `values`.
fn page_body(values: serde_json::Value, is_last: bool, start: u32) -> String {
    let size = values.as_array().map(|a| a.len()).unwrap_or(0);
    json!({
        "size": size,
        "limit": 25,
        "isLastPage": is_last,
        "values": values,
        "start": start,
    })
    .to_string()
}

fn client(server: &ServerGuard) -> BitbucketServerClient {
    let base_url = Url::parse(&server.url()).unwrap();
    BitbucketServerClient::new(&base_url, Some("user"), Some("pass")).unwrap()
}

#[tokio::test]
async fn concatenated_pages_preserve_order() {
    let mut server = Server::new_async().await;

    let p1 = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(
            json!([{"key": "P1", "name": "One"}, {"key": "P2", "name": "Two"}]),
            false,
            0,
        ))
        .create_async()
        .await;
    let p2 = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "2".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(
            json!([{"key": "P3", "name": "Three"}, {"key": "P4", "name": "Four"}]),
            false,
            2,
        ))
        .create_async()
        .await;
    let p3 = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "4".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([{"key": "P5", "name": "Five"}]), true, 4))
        .create_async()
        .await;

    let projects: Vec<_> = client(&server).get_projects().try_collect().await.unwrap();

    let keys: Vec<_> = projects.iter().filter_map(|p| p.key.as_deref()).collect();
    assert_eq!(keys, ["P1", "P2", "P3", "P4", "P5"]);

    p1.assert_async().await;
    p2.assert_async().await;
    p3.assert_async().await;
}

#[tokio::test]
async fn zero_size_page_terminates_iteration() {
    let mut server = Server::new_async().await;

    // Malformed page: empty but not flagged as last. The client must stop
    // instead of re-requesting the same offset forever.
    let mock = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([]), false, 0))
        .expect(1)
        .create_async()
        .await;

    let projects: Vec<_> = client(&server).get_projects().try_collect().await.unwrap();
    assert!(projects.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn early_stop_fetches_no_further_pages() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(
            json!([{"key": "P1", "name": "One"}, {"key": "P2", "name": "Two"}]),
            false,
            0,
        ))
        .create_async()
        .await;
    let second_page = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "2".into()))
        .expect(0)
        .create_async()
        .await;

    let bitbucket = client(&server);
    let taken: Vec<_> = bitbucket
        .get_projects()
        .take(2)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(taken.len(), 2);

    second_page.assert_async().await;
}

#[tokio::test]
async fn project_lookup_is_case_insensitive_and_returns_first_match() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(
            json!([
                {"key": "FIRST", "name": "FOO"},
                {"key": "SECOND", "name": "foo"},
            ]),
            true,
            0,
        ))
        .create_async()
        .await;

    let project = client(&server)
        .get_project_by_name("Foo")
        .await
        .unwrap()
        .expect("project should match case-insensitively");
    assert_eq!(project.key.as_deref(), Some("FIRST"));
}

#[tokio::test]
async fn project_lookup_scans_all_pages_before_giving_up() {
    let mut server = Server::new_async().await;

    let p1 = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([{"key": "A", "name": "Alpha"}]), false, 0))
        .create_async()
        .await;
    let p2 = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "1".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([{"key": "B", "name": "Beta"}]), true, 1))
        .create_async()
        .await;

    let result = client(&server).get_project_by_name("Gamma").await.unwrap();
    assert!(result.is_none());

    p1.assert_async().await;
    p2.assert_async().await;
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errors": [{"message": "Authentication failed."}]}"#)
        .create_async()
        .await;

    let err = client(&server)
        .get_projects()
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "Authentication failed.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn requests_carry_basic_auth_when_credentials_present() {
    let mut server = Server::new_async().await;

    // base64("user:pass")
    let mock = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([]), true, 0))
        .create_async()
        .await;

    client(&server)
        .get_projects()
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn requests_are_anonymous_without_credentials() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/rest/api/1.0/projects")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .match_header("authorization", Matcher::Missing)
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([]), true, 0))
        .create_async()
        .await;

    let base_url = Url::parse(&server.url()).unwrap();
    let anonymous = BitbucketServerClient::new(&base_url, None, None).unwrap();
    anonymous
        .get_projects()
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn path_segments_are_escaped() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/rest/api/1.0/projects/A%20B/repos")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_header("content-type", "application/json")
        .with_body(page_body(json!([]), true, 0))
        .create_async()
        .await;

    client(&server)
        .get_repositories("A B")
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn merge_posts_version_and_strategy() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "POST",
            "/rest/api/1.0/projects/APPS/repos/billing/pull-requests/42/merge",
        )
        .match_body(Matcher::PartialJson(json!({
            "version": 7,
            "strategyId": "squash",
            "message": "release train",
        })))
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    client(&server)
        .merge_pull_request("APPS", "billing", "42", Some("release train"), Some("squash"), 7)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn merge_conflict_status_propagates() {
    let mut server = Server::new_async().await;

    server
        .mock(
            "POST",
            "/rest/api/1.0/projects/APPS/repos/billing/pull-requests/42/merge",
        )
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errors": [{"message": "Pull request is out of date."}]}"#)
        .create_async()
        .await;

    let err = client(&server)
        .merge_pull_request("APPS", "billing", "42", None, None, 3)
        .await
        .unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status.as_u16(), 409);
            assert_eq!(message, "Pull request is out of date.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn get_pull_request_fetches_single_resource() {
    let mut server = Server::new_async().await;

    server
        .mock(
            "GET",
            "/rest/api/1.0/projects/APPS/repos/billing/pull-requests/42",
        )
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 42,
                "version": 7,
                "open": true,
                "title": "Add retry budget",
            })
            .to_string(),
        )
        .create_async()
        .await;

    let pr = client(&server)
        .get_pull_request("APPS", "billing", "42")
        .await
        .unwrap();
    assert_eq!(pr.id, 42);
    assert_eq!(pr.version, 7);
    assert!(pr.open);
}
