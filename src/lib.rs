//
//  bitbucket-server-connector
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server Connector
//!
//! A source-control integration adapter that lets a build/release
//! orchestration platform discover, browse, and manipulate Git repositories
//! hosted on a Bitbucket Server or Data Center instance, via the Bitbucket
//! REST API v1.0.
//!
//! ## Overview
//!
//! The crate is layered, leaves first:
//!
//! - [`api`]: the typed REST client. Paginated endpoints are exposed as
//!   lazy, single-pass [`Stream`](futures::Stream)s that fetch pages only
//!   as the consumer drains them.
//! - [`repository`]: the resolution facade. Given human-entered project and
//!   repository names, it re-resolves them to stable keys/slugs on every
//!   call and exposes branch listing, pull request listing and merge, and
//!   repository info through the service-neutral [`git`] traits.
//! - [`service`]: service metadata plus the namespace/repository pickers.
//!
//! Credentials are resolved by the host platform and handed in as
//! [`GitCredentials`]; this crate never stores or refreshes secrets.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_server_connector::{
//!     BitbucketAccount, BitbucketServerRepository, GitCredentials,
//! };
//! use bitbucket_server_connector::git::GitServiceRepository;
//! use futures::TryStreamExt;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = GitCredentials::from(BitbucketAccount::new(
//!     Url::parse("https://bitbucket.example.com/")?,
//!     "builder",
//!     "s3cret",
//! ));
//!
//! let repo = BitbucketServerRepository::new("Applications", "Billing Service");
//!
//! let branches: Vec<_> = repo
//!     .get_remote_branches(&credentials)
//!     .await?
//!     .try_collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! Bitbucket Server has no commit-status API, so
//! [`set_commit_status`](git::GitServiceRepository::set_commit_status)
//! always fails with an unsupported-operation error. The crate performs no
//! caching, no retries, and no write operations beyond pull-request merge.

/// REST client layer: HTTP transport, pagination, and wire-format DTOs.
pub mod api;

/// Resolved credential types handed in by the host platform.
pub mod credentials;

/// Service-neutral Git domain: object ids, branch/pull-request types, and
/// the service traits.
pub mod git;

/// The Bitbucket Server repository resolution facade.
pub mod repository;

/// The Bitbucket Server service descriptor and configuration pickers.
pub mod service;

pub use api::{ApiError, BitbucketServerClient};
pub use credentials::{BitbucketAccount, GitCredentials, ServiceCredentials};
pub use git::ServiceError;
pub use repository::BitbucketServerRepository;
pub use service::BitbucketServerService;

/// Crate version, sent as part of the User-Agent header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
