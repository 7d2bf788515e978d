//
//  bitbucket-server-connector
//  api/server/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/27.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/Data Center REST Resources
//!
//! Wire-format types for the Bitbucket Server REST API v1.0, one module per
//! resource:
//!
//! - [`projects`]: project containers that group repositories
//! - [`repositories`]: repositories with clone/browse links
//! - [`branches`]: branch refs with their latest commits
//! - [`pullrequests`]: pull requests and the merge request body
//!
//! Every field that Bitbucket may omit is optional or defaulted; these types
//! are call-scoped DTOs constructed from one response and discarded after
//! mapping into the neutral [`git`](crate::git) domain.

pub mod branches;
pub mod projects;
pub mod pullrequests;
pub mod repositories;

pub use branches::Branch;
pub use projects::Project;
pub use pullrequests::{MergePullRequest, PullRequest};
pub use repositories::{NamedLink, Repository, RepositoryLinks, SelfLink};
