//
//  bitbucket-server-connector
//  git/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Service-Neutral Git Domain
//!
//! This module defines the types and traits the orchestration platform
//! programs against, independent of any particular Git hosting service.
//! A hosting service plugs in by implementing two traits:
//!
//! - [`GitService`]: service-level metadata plus namespace and repository
//!   name enumeration (used by configuration pickers).
//! - [`GitServiceRepository`]: a configured repository handle exposing
//!   branch listing, pull request listing, repository info, and pull
//!   request merge.
//!
//! [`BitbucketServerRepository`](crate::BitbucketServerRepository) and
//! [`BitbucketServerService`](crate::BitbucketServerService) are the
//! Bitbucket Server/Data Center implementations; other services implement
//! the same traits with their own REST clients.
//!
//! All listing operations return boxed [`Stream`](futures::Stream)s: results
//! are produced lazily, page by page, and dropping the stream early aborts
//! any in-flight request without fetching further pages.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::api::ApiError;
use crate::credentials::GitCredentials;

mod object_id;

pub use object_id::{GitObjectId, InvalidObjectId};

/// Error type for all service-level repository operations.
///
/// The variants mirror the failure classes a caller can meaningfully react
/// to. Configuration and credential problems are reported before any network
/// I/O; lookup failures name the entity that was searched for; transport
/// failures pass through unchanged as [`ServiceError::Api`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The repository handle is misconfigured (missing names, wrong
    /// credential type). Raised before any network call is made.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No project with the configured name exists on the server.
    ///
    /// Only raised after the full project listing has been scanned.
    #[error("project {0} not found")]
    ProjectNotFound(String),

    /// No repository with the configured name exists in the project.
    #[error("repository {repository} not found in project {project}")]
    RepositoryNotFound {
        /// The project that was searched.
        project: String,
        /// The repository name that was not found.
        repository: String,
    },

    /// A merge was attempted against a pull request whose target branch has
    /// moved since the caller last observed it.
    #[error("cannot merge pull request {id}; head commits differ")]
    MergeConflict {
        /// The pull request id the merge was attempted on.
        id: String,
    },

    /// The operation is not supported by this service.
    #[error("{0} is not supported by Bitbucket Server")]
    Unsupported(&'static str),

    /// A transport-level failure from the REST client.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A remote branch with a resolved tip commit.
///
/// Produced by [`GitServiceRepository::get_remote_branches`]. Entries are
/// only emitted when the service reported both a usable ref name and a
/// parseable commit hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemoteBranch {
    /// The commit the branch currently points at.
    pub commit: GitObjectId,
    /// The short human ref name (e.g. `main`), without the `refs/heads/` prefix.
    pub name: String,
}

impl GitRemoteBranch {
    /// Creates a remote branch record.
    pub fn new(commit: GitObjectId, name: impl Into<String>) -> Self {
        Self {
            commit,
            name: name.into(),
        }
    }
}

/// A pull request in service-neutral form.
///
/// Produced by [`GitServiceRepository::get_pull_requests`]. The `id` is the
/// service's stable identifier rendered as a string; pass it back verbatim
/// to [`GitServiceRepository::merge_pull_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitPullRequest {
    /// Service-assigned pull request identifier.
    pub id: String,
    /// Link to the pull request in the service's web UI, when available.
    pub url: Option<String>,
    /// Pull request title, when available.
    pub title: Option<String>,
    /// Whether the pull request is closed (merged or declined).
    pub closed: bool,
    /// Source branch name.
    pub from_branch: String,
    /// Target branch name.
    pub to_branch: String,
}

/// The kind of object a browse URL should point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitBrowseTargetType {
    /// A branch; services typically expand this to a full ref name.
    Branch,
    /// A tag.
    Tag,
    /// A commit hash.
    Commit,
}

/// A request for a web UI URL pointing at a particular ref or commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitBrowseTarget {
    /// What kind of object `value` names.
    pub target_type: GitBrowseTargetType,
    /// The branch name, tag name, or commit hash.
    pub value: String,
}

impl GitBrowseTarget {
    /// Creates a browse target for a branch name.
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            target_type: GitBrowseTargetType::Branch,
            value: name.into(),
        }
    }

    /// Creates a browse target for a tag name.
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            target_type: GitBrowseTargetType::Tag,
            value: name.into(),
        }
    }

    /// Creates a browse target for a commit hash.
    pub fn commit(hash: impl Into<String>) -> Self {
        Self {
            target_type: GitBrowseTargetType::Commit,
            value: hash.into(),
        }
    }
}

/// Resolved information about a repository, as understood by its host.
///
/// Implemented by each service's repository DTO so that URL construction
/// rules (clone protocol selection, browse URL query formats) stay with the
/// service that defines them.
pub trait GitRepositoryInfo: Send + Sync {
    /// The HTTP clone URL, or an empty string when the service reported none.
    fn repository_url(&self) -> String;

    /// The repository's landing page in the service's web UI.
    fn browse_url(&self) -> Option<String>;

    /// The default branch ref, when the service reports one.
    fn default_branch(&self) -> Option<String>;

    /// A web UI URL pointing at `target`, or `None` when no browse URL is
    /// known for the repository.
    fn browse_url_for_target(&self, target: &GitBrowseTarget) -> Option<String>;
}

/// A lazily-produced sequence of service results.
///
/// Single-consumer and single-pass: re-listing requires a fresh call.
/// Dropping the stream aborts any in-flight request.
pub type ServiceStream<T> = BoxStream<'static, Result<T, ServiceError>>;

/// A configured repository handle on some Git hosting service.
///
/// Implementations resolve their configured identity (for Bitbucket Server,
/// a project name and repository name) on every call; nothing is cached
/// between operations, so renames on the server are tolerated at the cost
/// of redundant lookups.
#[async_trait]
pub trait GitServiceRepository: Send + Sync {
    /// A short human-readable description of the configured repository,
    /// e.g. `Apps/billing-service`.
    fn description(&self) -> String;

    /// Lists remote branches with their tip commits.
    ///
    /// Branches the service reports without a usable ref name or with an
    /// unparseable commit hash are silently skipped.
    async fn get_remote_branches(
        &self,
        credentials: &GitCredentials,
    ) -> Result<ServiceStream<GitRemoteBranch>, ServiceError>;

    /// Lists pull requests.
    ///
    /// When `include_closed` is false, only open pull requests are emitted.
    /// Pull requests missing either ref name are silently skipped.
    async fn get_pull_requests(
        &self,
        credentials: &GitCredentials,
        include_closed: bool,
    ) -> Result<ServiceStream<GitPullRequest>, ServiceError>;

    /// Resolves the repository and returns its host-side information.
    async fn get_repository_info(
        &self,
        credentials: &GitCredentials,
    ) -> Result<Box<dyn GitRepositoryInfo>, ServiceError>;

    /// Merges a pull request.
    ///
    /// `head_commit` is the target-branch tip the caller last observed; the
    /// merge is rejected with [`ServiceError::MergeConflict`] if the target
    /// has moved since, without contacting the merge endpoint.
    async fn merge_pull_request(
        &self,
        credentials: &GitCredentials,
        id: &str,
        head_commit: &str,
        message: Option<&str>,
        method: Option<&str>,
    ) -> Result<(), ServiceError>;

    /// Reports a commit build status to the service.
    ///
    /// Services without a commit status API fail with
    /// [`ServiceError::Unsupported`] and perform no I/O.
    async fn set_commit_status(
        &self,
        credentials: &GitCredentials,
        commit: &str,
        status: &str,
        description: Option<&str>,
        context: Option<&str>,
    ) -> Result<(), ServiceError>;
}

/// Service-level metadata and enumeration for configuration pickers.
#[async_trait]
pub trait GitService: Send + Sync {
    /// Human-readable service name.
    fn service_name(&self) -> &'static str;

    /// Display name for the service's namespace concept.
    fn namespace_display_name(&self) -> &'static str {
        "Namespace"
    }

    /// Display name for the secret field.
    fn password_display_name(&self) -> &'static str {
        "Password"
    }

    /// Display name for the API URL field.
    fn api_url_display_name(&self) -> &'static str {
        "API URL"
    }

    /// Placeholder text for the API URL field.
    fn api_url_placeholder(&self) -> Option<&'static str> {
        None
    }

    /// Enumerates namespaces (for Bitbucket Server: project names).
    async fn get_namespaces(
        &self,
        credentials: &GitCredentials,
    ) -> Result<ServiceStream<String>, ServiceError>;

    /// Enumerates repository names within a namespace.
    ///
    /// An unknown namespace yields an empty stream, not an error.
    async fn get_repository_names(
        &self,
        credentials: &GitCredentials,
        namespace: &str,
    ) -> Result<ServiceStream<String>, ServiceError>;
}
