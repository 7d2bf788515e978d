//
//  bitbucket-server-connector
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Bitbucket Server REST API
//!
//! [`BitbucketServerClient`] wraps a [`reqwest::Client`] fixed to one base
//! URL and one set of credentials, and exposes the typed operations the
//! repository facade needs: project/repository/branch/pull-request listing,
//! single pull-request fetch, and pull-request merge.
//!
//! ## Paginated listings
//!
//! Listing operations return lazy [`Stream`]s driven by the offset
//! pagination described in [`common::pagination`](crate::api::common):
//! each page is fetched only once the consumer has drained the previous
//! one, so stopping early never costs an extra request, and dropping the
//! stream aborts any request still in flight. Streams are single-pass;
//! re-listing requires a fresh call.
//!
//! ## Identity
//!
//! The client is stateless beyond its construction-time identity (base URL
//! plus optional Basic auth), so one instance is safe to share across
//! concurrent operations. Cloning is cheap; the underlying connection pool
//! is shared.

use std::borrow::Cow;

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::api::common::{format_api_error, with_start, ApiError, Page};
use crate::api::server::{Branch, MergePullRequest, Project, PullRequest, Repository};
use crate::credentials::{BitbucketAccount, GitCredentials};

/// REST API version used for all endpoints.
const API_VERSION: &str = "1.0";

/// Basic-auth pair applied to every request.
#[derive(Clone)]
struct BasicAuth {
    user_name: String,
    password: String,
}

/// A typed client for one Bitbucket Server/Data Center instance.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_server_connector::api::BitbucketServerClient;
/// use futures::TryStreamExt;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base_url = Url::parse("https://bitbucket.example.com/")?;
/// let client = BitbucketServerClient::new(&base_url, Some("builder"), Some("s3cret"))?;
///
/// let mut projects = std::pin::pin!(client.get_projects());
/// while let Some(project) = projects.try_next().await? {
///     println!("{:?}", project.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BitbucketServerClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL of the server; always ends with a slash.
    base_url: Url,
    /// Basic-auth credentials, when both user name and secret were supplied.
    auth: Option<BasicAuth>,
}

impl BitbucketServerClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// HTTP Basic authentication is used when both `user_name` and
    /// `password` are present and non-empty; otherwise requests are
    /// anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(
        base_url: &Url,
        user_name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ApiError> {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(format!("bitbucket-server-connector/{}", crate::VERSION))
            .default_headers(headers)
            .build()?;

        let auth = match (user_name, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some(BasicAuth {
                user_name: user.to_string(),
                password: pass.to_string(),
            }),
            _ => None,
        };

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// Creates a client from a Bitbucket account.
    pub fn from_account(account: &BitbucketAccount) -> Result<Self, ApiError> {
        Self::new(
            &account.service_url,
            account.user_name.as_deref(),
            account.password.as_deref(),
        )
    }

    /// Creates a client from any resolved credentials variant.
    ///
    /// Used by service-level enumeration, which accepts generic credentials
    /// as well as Bitbucket accounts.
    pub fn from_credentials(credentials: &GitCredentials) -> Result<Self, ApiError> {
        Self::new(
            credentials.service_url(),
            credentials.user_name(),
            credentials.password(),
        )
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists all projects on the server.
    pub fn get_projects(&self) -> impl Stream<Item = Result<Project, ApiError>> + Send + 'static {
        self.get_paged(format!("rest/api/{API_VERSION}/projects"))
    }

    /// Finds a project by display name, scanning the full paginated
    /// listing case-insensitively.
    ///
    /// Returns the first match; `Ok(None)` when no project matches. Absence
    /// is not an error at this layer; callers decide what it means.
    pub async fn get_project_by_name(
        &self,
        project_name: &str,
    ) -> Result<Option<Project>, ApiError> {
        let projects = self.get_projects();
        futures::pin_mut!(projects);

        while let Some(project) = projects.try_next().await? {
            if project.name_matches(project_name) {
                return Ok(Some(project));
            }
        }

        Ok(None)
    }

    /// Lists the repositories of a project.
    pub fn get_repositories(
        &self,
        project_key: &str,
    ) -> impl Stream<Item = Result<Repository, ApiError>> + Send + 'static {
        self.get_paged(format!(
            "rest/api/{API_VERSION}/projects/{}/repos",
            escape(project_key)
        ))
    }

    /// Finds a repository by display name within a project, scanning the
    /// full paginated listing case-insensitively.
    pub async fn get_repository_by_name(
        &self,
        project_key: &str,
        repository_name: &str,
    ) -> Result<Option<Repository>, ApiError> {
        let repositories = self.get_repositories(project_key);
        futures::pin_mut!(repositories);

        while let Some(repository) = repositories.try_next().await? {
            if repository.name_matches(repository_name) {
                return Ok(Some(repository));
            }
        }

        Ok(None)
    }

    /// Lists the branches of a repository.
    pub fn get_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> impl Stream<Item = Result<Branch, ApiError>> + Send + 'static {
        self.get_paged(format!(
            "rest/api/{API_VERSION}/projects/{}/repos/{}/branches",
            escape(project_key),
            escape(repository_slug)
        ))
    }

    /// Lists the pull requests of a repository.
    pub fn get_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> impl Stream<Item = Result<PullRequest, ApiError>> + Send + 'static {
        self.get_paged(format!(
            "rest/api/{API_VERSION}/projects/{}/repos/{}/pull-requests",
            escape(project_key),
            escape(repository_slug)
        ))
    }

    /// Fetches a single pull request by id.
    ///
    /// # Errors
    ///
    /// Fails when the server returns a non-success status or a body that
    /// does not deserialize as a pull request.
    pub async fn get_pull_request(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: &str,
    ) -> Result<PullRequest, ApiError> {
        self.get_json(&format!(
            "rest/api/{API_VERSION}/projects/{}/repos/{}/pull-requests/{}",
            escape(project_key),
            escape(repository_slug),
            escape(pull_request_id)
        ))
        .await
    }

    /// Merges a pull request.
    ///
    /// `version` must be the value read from the pull request immediately
    /// beforehand; a stale version is rejected by the server with HTTP 409,
    /// which surfaces unchanged as [`ApiError::Http`]. The response body is
    /// discarded on success.
    pub async fn merge_pull_request(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: &str,
        message: Option<&str>,
        strategy: Option<&str>,
        version: u64,
    ) -> Result<(), ApiError> {
        let path = format!(
            "rest/api/{API_VERSION}/projects/{}/repos/{}/pull-requests/{}/merge",
            escape(project_key),
            escape(repository_slug),
            escape(pull_request_id)
        );

        let body = MergePullRequest {
            auto_subject: false,
            message: message.map(str::to_string),
            strategy_id: strategy.map(str::to_string),
            version,
        };

        self.post_json(&path, &body).await
    }

    /// Consumes an offset-paginated endpoint as a lazy stream of items.
    ///
    /// Each page's values are yielded in response order before the next
    /// page is requested; the loop stops once a page declares itself last
    /// or reports a size below one. The stream owns a clone of the client,
    /// so it is `'static` and can outlive the handle that created it.
    fn get_paged<T>(&self, path: String) -> impl Stream<Item = Result<T, ApiError>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();

        stream::try_unfold(
            (client, path, 0u32, false),
            |(client, path, start, done)| async move {
                if done {
                    return Ok::<_, ApiError>(None);
                }

                let page: Page<T> = client.get_json(&with_start(&path, start)).await?;
                let done = page.is_final();
                let next_start = start + page.size;
                let items = stream::iter(page.values.into_iter().map(Ok::<T, ApiError>));

                Ok(Some((items, (client, path, next_start, done))))
            },
        )
        .try_flatten()
    }

    /// Issues a GET request and deserializes the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        debug!(url = %url, "GET");

        let mut request = self.http.get(url);
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.user_name, Some(&auth.password));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format_api_error(status, &body));
        }

        Ok(response.json().await?)
    }

    /// Issues a POST request with a JSON body, discarding the response body.
    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.base_url.join(path)?;
        debug!(url = %url, "POST");

        let mut request = self.http.post(url).json(body);
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.user_name, Some(&auth.password));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format_api_error(status, &text));
        }

        Ok(())
    }
}

/// Percent-escapes one path segment (RFC 3986, unreserved characters kept).
fn escape(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
