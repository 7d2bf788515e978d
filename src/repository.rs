//
//  bitbucket-server-connector
//  repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Repository Resolution Facade
//!
//! [`BitbucketServerRepository`] is the component the orchestration
//! platform talks to. It is configured with the human-entered project and
//! repository *names*; every operation re-resolves those names to the
//! stable project key and repository slug before doing its work:
//!
//! 1. validate configuration and credential type (no network I/O yet);
//! 2. scan the project listing for a case-insensitive name match;
//! 3. scan that project's repositories the same way;
//! 4. run the operation against the resolved key/slug pair.
//!
//! Nothing is cached between calls. A rename on the server is picked up by
//! the very next operation, at the cost of the redundant lookups.

use async_trait::async_trait;
use futures::future;
use futures::stream::StreamExt;
use tracing::debug;

use crate::api::server::{Branch, PullRequest, Repository};
use crate::api::BitbucketServerClient;
use crate::credentials::GitCredentials;
use crate::git::{
    GitObjectId, GitPullRequest, GitRemoteBranch, GitRepositoryInfo, GitServiceRepository,
    ServiceError, ServiceStream,
};

/// A Bitbucket Server repository handle, addressed by project and
/// repository display names.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_server_connector::{BitbucketAccount, BitbucketServerRepository, GitCredentials};
/// use bitbucket_server_connector::git::GitServiceRepository;
/// use futures::TryStreamExt;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = GitCredentials::from(BitbucketAccount::new(
///     Url::parse("https://bitbucket.example.com/")?,
///     "builder",
///     "s3cret",
/// ));
///
/// let repo = BitbucketServerRepository::new("Applications", "Billing Service");
/// let mut branches = repo.get_remote_branches(&credentials).await?;
/// while let Some(branch) = branches.try_next().await? {
///     println!("{} -> {}", branch.name, branch.commit);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BitbucketServerRepository {
    project_name: Option<String>,
    repository_name: Option<String>,
}

/// Resolution output carried into each operation.
struct InitData {
    client: BitbucketServerClient,
    project_key: String,
    repository_slug: String,
    repository: Repository,
}

impl BitbucketServerRepository {
    /// Creates a handle for `repository_name` within `project_name`.
    ///
    /// Names are validated lazily: operations fail with a configuration
    /// error when either is empty.
    pub fn new(project_name: impl Into<String>, repository_name: impl Into<String>) -> Self {
        Self {
            project_name: Some(project_name.into()),
            repository_name: Some(repository_name.into()),
        }
    }

    /// The configured project name, Bitbucket's namespace concept.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// The configured repository name.
    pub fn repository_name(&self) -> Option<&str> {
        self.repository_name.as_deref()
    }

    /// Validates configuration and credentials, then resolves the
    /// configured names to a project key and repository slug.
    async fn resolve(&self, credentials: &GitCredentials) -> Result<InitData, ServiceError> {
        let (Some(project_name), Some(repository_name)) = (
            self.project_name.as_deref().filter(|n| !n.is_empty()),
            self.repository_name.as_deref().filter(|n| !n.is_empty()),
        ) else {
            return Err(ServiceError::Configuration(
                "project name and repository name are required".to_string(),
            ));
        };

        let GitCredentials::BitbucketAccount(account) = credentials else {
            return Err(ServiceError::Configuration(
                "invalid credentials; expected a Bitbucket account".to_string(),
            ));
        };

        let client = BitbucketServerClient::from_account(account)?;

        let project_key = client
            .get_project_by_name(project_name)
            .await?
            .and_then(|project| project.key)
            .ok_or_else(|| ServiceError::ProjectNotFound(project_name.to_string()))?;

        let repository = client
            .get_repository_by_name(&project_key, repository_name)
            .await?;

        let not_found = || ServiceError::RepositoryNotFound {
            project: project_name.to_string(),
            repository: repository_name.to_string(),
        };
        let repository = repository.ok_or_else(not_found)?;
        let repository_slug = repository.slug.clone().ok_or_else(not_found)?;

        debug!(project_key, repository_slug, "resolved repository");

        Ok(InitData {
            client,
            project_key,
            repository_slug,
            repository,
        })
    }
}

#[async_trait]
impl GitServiceRepository for BitbucketServerRepository {
    fn description(&self) -> String {
        format!(
            "{}/{}",
            self.project_name.as_deref().unwrap_or_default(),
            self.repository_name.as_deref().unwrap_or_default()
        )
    }

    async fn get_remote_branches(
        &self,
        credentials: &GitCredentials,
    ) -> Result<ServiceStream<GitRemoteBranch>, ServiceError> {
        let init = self.resolve(credentials).await?;

        let stream = init
            .client
            .get_branches(&init.project_key, &init.repository_slug)
            .filter_map(|item| {
                future::ready(match item {
                    Ok(branch) => remote_branch(branch).map(Ok),
                    Err(err) => Some(Err(ServiceError::from(err))),
                })
            })
            .boxed();

        Ok(stream)
    }

    async fn get_pull_requests(
        &self,
        credentials: &GitCredentials,
        include_closed: bool,
    ) -> Result<ServiceStream<GitPullRequest>, ServiceError> {
        let init = self.resolve(credentials).await?;

        let stream = init
            .client
            .get_pull_requests(&init.project_key, &init.repository_slug)
            .filter_map(move |item| {
                future::ready(match item {
                    Ok(pr) if !include_closed && !pr.open => None,
                    Ok(pr) => pull_request(pr).map(Ok),
                    Err(err) => Some(Err(ServiceError::from(err))),
                })
            })
            .boxed();

        Ok(stream)
    }

    async fn get_repository_info(
        &self,
        credentials: &GitCredentials,
    ) -> Result<Box<dyn GitRepositoryInfo>, ServiceError> {
        let init = self.resolve(credentials).await?;
        Ok(Box::new(init.repository))
    }

    async fn merge_pull_request(
        &self,
        credentials: &GitCredentials,
        id: &str,
        head_commit: &str,
        message: Option<&str>,
        method: Option<&str>,
    ) -> Result<(), ServiceError> {
        let init = self.resolve(credentials).await?;

        // Re-read the pull request: the head-commit check needs the live
        // target ref, and the merge needs the current version token.
        let pull_request = init
            .client
            .get_pull_request(&init.project_key, &init.repository_slug, id)
            .await?;

        let target_head = pull_request
            .to_ref
            .as_ref()
            .and_then(|r| r.latest_commit.as_deref());

        if !target_head.is_some_and(|commit| commit.eq_ignore_ascii_case(head_commit)) {
            return Err(ServiceError::MergeConflict { id: id.to_string() });
        }

        init.client
            .merge_pull_request(
                &init.project_key,
                &init.repository_slug,
                id,
                message,
                method,
                pull_request.version,
            )
            .await?;

        Ok(())
    }

    async fn set_commit_status(
        &self,
        _credentials: &GitCredentials,
        _commit: &str,
        _status: &str,
        _description: Option<&str>,
        _context: Option<&str>,
    ) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported("commit status reporting"))
    }
}

/// Maps a branch DTO into the neutral form, or `None` when the entry is
/// unusable (missing ref name, or a commit hash that does not parse).
fn remote_branch(branch: Branch) -> Option<GitRemoteBranch> {
    let commit = GitObjectId::try_parse(branch.latest_commit.as_deref())?;
    let name = branch.display_id?;
    Some(GitRemoteBranch::new(commit, name))
}

/// Maps a pull request DTO into the neutral form, or `None` when either
/// ref name is missing.
fn pull_request(pr: PullRequest) -> Option<GitPullRequest> {
    let from_branch = pr
        .from_ref
        .as_ref()
        .and_then(|r| r.display_id.as_deref())
        .filter(|n| !n.is_empty())?
        .to_string();
    let to_branch = pr
        .to_ref
        .as_ref()
        .and_then(|r| r.display_id.as_deref())
        .filter(|n| !n.is_empty())?
        .to_string();

    Some(GitPullRequest {
        id: pr.id.to_string(),
        url: pr.self_url().map(str::to_string),
        title: pr.title.clone(),
        closed: !pr.open,
        from_branch,
        to_branch,
    })
}
